//! Arbitrary-precision complex numbers.
//!
//! MicroScheme's numeric tower is "real is a complex number whose imaginary
//! part is exactly zero". The arbitrary-precision arithmetic itself is an
//! external collaborator ([`rug::Complex`], backed by GMP/MPC) — this module
//! wraps it in the shape the evaluator and primitive library need: literal
//! parsing, the arithmetic and transcendental operations `builtin::num`
//! dispatches to, and the `a+bi` display format `builtin::io` prints.

use rug::ops::Pow;
use rug::{Complex, Float};
use std::fmt;

/// Working precision, in bits, for every [`Number`]. Chosen well above
/// `f64`'s 53 bits so that repeated arithmetic doesn't visibly round off;
/// this is the "arbitrary" precision the spec's numeric backing library
/// provides, fixed at a generous constant rather than grown per-value.
pub const PRECISION: u32 = 256;

#[derive(Clone, Debug)]
pub struct Number(Complex);

impl Number {
    pub fn from_real(value: f64) -> Self {
        Number(Complex::with_val(PRECISION, (value, 0.0)))
    }

    pub fn from_parts(re: f64, im: f64) -> Self {
        Number(Complex::with_val(PRECISION, (re, im)))
    }

    fn from_complex(c: Complex) -> Self {
        Number(c)
    }

    /// Parses a signed decimal literal with an optional fractional part,
    /// e.g. `"-12.5"`, `".5"`, `"7"`. Returns `None` on malformed input.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let float = Float::parse(text).ok()?;
        Some(Number::from_real_float(Float::with_val(PRECISION, float)))
    }

    fn from_real_float(f: Float) -> Self {
        Number(Complex::with_val(PRECISION, (f, 0)))
    }

    pub fn is_real(&self) -> bool {
        self.0.imag().is_zero()
    }

    pub fn real_part(&self) -> Number {
        Number::from_real_float(self.0.real().clone())
    }

    pub fn imag_part(&self) -> Number {
        Number::from_real_float(self.0.imag().clone())
    }

    fn real(&self) -> Option<Float> {
        self.is_real().then(|| self.0.real().clone())
    }

    pub fn to_f64(&self) -> Option<f64> {
        self.real().map(|r| r.to_f64())
    }

    pub fn to_i64(&self) -> Option<i64> {
        let r = self.real()?;
        if r.clone().fract() == 0.0_f64 {
            r.to_integer().and_then(|i| i.to_i64())
        } else {
            None
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0.real().is_zero() && self.0.imag().is_zero()
    }

    pub fn add(&self, other: &Number) -> Number {
        Number::from_complex(Complex::with_val(PRECISION, &self.0 + &other.0))
    }

    pub fn sub(&self, other: &Number) -> Number {
        Number::from_complex(Complex::with_val(PRECISION, &self.0 - &other.0))
    }

    pub fn mul(&self, other: &Number) -> Number {
        Number::from_complex(Complex::with_val(PRECISION, &self.0 * &other.0))
    }

    pub fn div(&self, other: &Number) -> Result<Number, &'static str> {
        if other.is_zero() {
            return Err("division by zero");
        }
        Ok(Number::from_complex(Complex::with_val(
            PRECISION,
            &self.0 / &other.0,
        )))
    }

    pub fn neg(&self) -> Number {
        Number::from_complex(Complex::with_val(PRECISION, -&self.0))
    }

    pub fn pow(&self, exponent: &Number) -> Number {
        Number::from_complex(Complex::with_val(PRECISION, (&self.0).pow(&exponent.0)))
    }

    fn real_op(&self, name: &'static str, f: impl FnOnce(Float) -> Float) -> Result<Number, &'static str> {
        match self.real() {
            Some(r) => Ok(Number::from_real_float(f(r))),
            None => Err(name),
        }
    }

    pub fn floor(&self) -> Result<Number, &'static str> {
        self.real_op("floor requires a real number", |r| r.floor())
    }

    pub fn ceiling(&self) -> Result<Number, &'static str> {
        self.real_op("ceiling requires a real number", |r| r.ceil())
    }

    pub fn round(&self) -> Result<Number, &'static str> {
        self.real_op("round requires a real number", |r| r.round())
    }

    pub fn truncate(&self) -> Result<Number, &'static str> {
        self.real_op("truncate requires a real number", |r| r.trunc())
    }

    /// `remainder` keeps the dividend's sign.
    pub fn remainder(&self, other: &Number) -> Result<Number, &'static str> {
        let a = self.real().ok_or("remainder requires real numbers")?;
        let b = other.real().ok_or("remainder requires real numbers")?;
        if b.is_zero() {
            return Err("division by zero");
        }
        let q = Float::with_val(PRECISION, &a / &b).trunc();
        Ok(Number::from_real_float(a - q * b))
    }

    /// `modulo` keeps the divisor's sign.
    pub fn modulo(&self, other: &Number) -> Result<Number, &'static str> {
        let a = self.real().ok_or("modulo requires real numbers")?;
        let b = other.real().ok_or("modulo requires real numbers")?;
        if b.is_zero() {
            return Err("division by zero");
        }
        let q = Float::with_val(PRECISION, &a / &b).floor();
        Ok(Number::from_real_float(a - q * b))
    }

    pub fn log(&self) -> Number {
        Number::from_complex(self.0.clone().ln())
    }

    pub fn compare(&self, other: &Number) -> Result<std::cmp::Ordering, &'static str> {
        let a = self.real().ok_or("ordering requires real numbers")?;
        let b = other.real().ok_or("ordering requires real numbers")?;
        a.partial_cmp(&b).ok_or("not a number (NaN)")
    }

    pub fn eq_value(&self, other: &Number) -> bool {
        self.0 == other.0
    }
}

macro_rules! transcendental {
    ($name:ident, $method:ident) => {
        impl Number {
            pub fn $name(&self) -> Number {
                Number::from_complex(self.0.clone().$method())
            }
        }
    };
}

transcendental!(sin, sin);
transcendental!(cos, cos);
transcendental!(tan, tan);
transcendental!(sinh, sinh);
transcendental!(cosh, cosh);
transcendental!(tanh, tanh);
transcendental!(asin, asin);
transcendental!(acos, acos);
transcendental!(atan, atan);

impl Number {
    /// `asinh`/`acosh`/`atanh` require real input per the spec.
    pub fn asinh(&self) -> Result<Number, &'static str> {
        self.real_op("asinh requires a real number", |r| r.asinh())
    }

    pub fn acosh(&self) -> Result<Number, &'static str> {
        self.real_op("acosh requires a real number", |r| r.acosh())
    }

    pub fn atanh(&self) -> Result<Number, &'static str> {
        self.real_op("atanh requires a real number", |r| r.atanh())
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.eq_value(other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let re = self.0.real();
        let im = self.0.imag();
        write_trimmed(f, re)?;
        if !im.is_zero() {
            if im.is_sign_negative() {
                write!(f, "-")?;
                write_trimmed(f, &Float::with_val(PRECISION, -im))?;
            } else {
                write!(f, "+")?;
                write_trimmed(f, im)?;
            }
            write!(f, "i")?;
        }
        Ok(())
    }
}

fn write_trimmed(f: &mut fmt::Formatter<'_>, value: &Float) -> fmt::Result {
    if value.clone().fract() == 0.0_f64 {
        if let Some(i) = value.to_integer() {
            return write!(f, "{i}");
        }
    }
    let text = format!("{:.*}", 15, value.to_f64());
    let trimmed = text.trim_end_matches('0');
    let trimmed = trimmed.trim_end_matches('.');
    write!(f, "{trimmed}")
}
