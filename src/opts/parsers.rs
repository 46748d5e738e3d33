use std::str::FromStr;

use crate::prelude::*;

pub fn non_zero_usize(value: &str) -> Result<usize> {
    match FromStr::from_str(value)? {
        value if value >= 1 => Ok(value),
        _ => Err(anyhow!("expected a positive number")),
    }
}

pub fn fraction(value: &str) -> Result<f64> {
    match f64::from_str(value)? {
        value if value > 0.0 && value < 1.0 => Ok(value),
        value => Err(anyhow!("{value} is not a valid fraction")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_zero_usize_ok() {
        assert_eq!(non_zero_usize("1").unwrap(), 1);
        assert!(non_zero_usize("0").is_err());
        assert!(non_zero_usize("-1").is_err());
    }

    #[test]
    fn fraction_ok() {
        assert_eq!(fraction("0.2").unwrap(), 0.2);
        assert!(fraction("0").is_err());
        assert!(fraction("1").is_err());
        assert!(fraction("oops").is_err());
    }
}
