#[macro_use]
mod common;

#[cfg(test)]
mod number {
    tests! {
        integer_valued_doubles_drop_the_point in number is OK
        "3"
        "2.5"
        "0.5"
    }

    tests! {
        float_arithmetic_uses_doubles in number is OK
        "0.30000000000000004"
    }
}
