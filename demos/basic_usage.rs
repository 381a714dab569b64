// ============================================================================
// Basic Usage Example
// ============================================================================

use numeric_tower::prelude::*;

fn main() -> NumericResult<()> {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt::init();

    println!("=== Numeric Tower Example ===\n");

    // Exact integers far beyond machine range
    println!("Computing factorials...");
    for n in [10i64, 25, 50] {
        let f = factorial(n)?;
        println!("{}! = {}", n, f.to_string_radix(10)?);
    }

    // Binomial coefficients stay exact
    let n: Natural = "100".parse()?;
    let r: Natural = "50".parse()?;
    println!("\nC(100, 50) = {}", n.choose(&r)?);

    // Floor division with sign handling
    println!("\nFloor division:");
    for (a, b) in [(-5i64, 3i64), (5, -3), (-5, -3)] {
        let (q, rem) = div_rem(a, b)?;
        println!(
            "{} div {} = {}, rem {}",
            a,
            b,
            q.to_string_radix(10)?,
            rem.to_string_radix(10)?
        );
    }

    // Rationals reduce automatically and render in several ways
    let q = sum("1/3".parse::<Value>()?, "1/6".parse::<Value>()?)?;
    println!("\n1/3 + 1/6 = {}", q.to_string_radix(10)?);
    println!("          = {}", q.to_fixed(6)?);
    println!("          = {}", q.to_precision(3)?);

    // Doubles reconstruct to their exact rational values
    let tenth = Value::try_from(0.1)?;
    println!("\n0.1 as stored by IEEE-754: {}", tenth.to_string_radix(10)?);

    // Computable reals evaluate to any requested precision
    let root = Real::sqrt(&"2".parse()?)?;
    println!("\nsqrt(2) to 10 digits: {}", root.to_fixed(10)?);
    println!("sqrt(2) to 40 digits: {}", root.to_fixed(40)?);

    // Combinators keep composite expressions within their bounds:
    // (sqrt(3) + sqrt(2)) * (sqrt(3) - sqrt(2)) = 1
    let a = Real::sqrt(&"2".parse()?)?;
    let b = Real::sqrt(&"3".parse()?)?;
    let product = b.sum(&a).prod(&b.diff(&a));
    println!(
        "(sqrt(3) + sqrt(2)) * (sqrt(3) - sqrt(2)) ~= {}",
        product.to_fixed(10)?
    );

    Ok(())
}
