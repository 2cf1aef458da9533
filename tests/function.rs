#[macro_use]
mod common;

#[cfg(test)]
mod function {
    tests! {
        display in function is OK
        "<fn add>"
        "<native fn>"
    }

    tests! {
        parameters in function is OK
        "6"
    }

    tests! {
        recursion in function is OK
        "21"
    }

    tests! {
        default_return in function is OK
        "nil"
    }

    tests! {
        wrong_arity in function is ERR(70)
        "Expected 2 arguments but got 1."
        "[line 4]"
    }

    tests! {
        call_nonfunction in function is ERR(70)
        "Can only call functions and classes."
        "[line 1]"
    }
}
