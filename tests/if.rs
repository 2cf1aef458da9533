#[macro_use]
mod common;

#[cfg(test)]
mod if_stmt {
    tests! {
        else_branch in if is OK
        "else"
    }

    tests! {
        truthiness in if is OK
        "zero is truthy"
        "empty is truthy"
        "nil is falsy"
    }

    tests! {
        dangling_else in if is OK
        "dangling"
    }
}
