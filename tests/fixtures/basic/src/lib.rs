/// Adds two numbers. See [Calculator] and [Calculator.total].
///
/// ```
/// let x = add(1, 2);
/// ```
pub fn add(a: i32, b: i32) -> i32 {
    return a + b;
}

/// Running sum. Built with [new Calculator.zero], compared via
/// [Calculator.operator ==]. Background: [guide](https://example.com).
pub struct Calculator {
    total: i32,
}

// Not documentation: [ignored]
fn helper() {}
