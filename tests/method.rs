#[macro_use]
mod common;

#[cfg(test)]
mod method {
    tests! {
        this_is_the_instance in method is OK
        "true"
    }

    tests! {
        bound_method_in_variable in method is OK
        "I am Ada"
    }

    tests! {
        this_survives_the_callback in method is OK
        "I am Ada"
    }
}
