#[macro_use]
mod common;

#[cfg(test)]
mod constructor {
    tests! {
        init_sets_fields in constructor is OK
        "3"
        "4"
    }

    tests! {
        early_return_yields_instance in constructor is OK
        "set"
    }

    tests! {
        calling_init_returns_this in constructor is OK
        "true"
    }

    tests! {
        return_value_in_init in constructor is ERR(65)
        "[line 3] Error at 'return': Cannot return a value from an initializer"
    }

    tests! {
        arity_from_init in constructor is ERR(70)
        "Expected 2 arguments but got 1."
        "[line 6]"
    }
}
