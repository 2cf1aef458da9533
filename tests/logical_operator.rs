#[macro_use]
mod common;

#[cfg(test)]
mod logical_operator {
    tests! {
        or_returns_operand in logical_operator is OK
        "yes"
        "first"
        "false"
    }

    tests! {
        and_returns_operand in logical_operator is OK
        "nil"
        "b"
        "false"
    }

    tests! {
        short_circuit in logical_operator is OK
        "false"
        "false"
    }
}
