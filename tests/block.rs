#[macro_use]
mod common;

#[cfg(test)]
mod block {
    tests! {
        nested_scopes in block is OK
        "inner"
        "outer"
    }

    tests! {
        resolved_before_shadow in block is OK
        "global"
        "global"
        "block"
    }
}
