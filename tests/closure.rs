#[macro_use]
mod common;

#[cfg(test)]
mod closure {
    tests! {
        counter in closure is OK
        "1"
        "2"
        "3"
    }

    tests! {
        capture_by_reference in closure is OK
        "updated"
    }

    tests! {
        shared_environment in closure is OK
        "42"
    }

    tests! {
        close_over_parameter in closure is OK
        "param"
    }
}
