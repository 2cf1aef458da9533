#[macro_use]
mod common;

#[cfg(test)]
mod class {
    tests! {
        display in class is OK
        "Dessert"
        "Dessert instance"
    }

    tests! {
        method in class is OK
        "hi"
    }

    tests! {
        method_mutates_state in class is OK
        "2"
        "5"
    }
}
