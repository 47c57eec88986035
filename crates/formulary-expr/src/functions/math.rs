//! Math functions

use crate::error::{ExprError, ExprResult};
use formulary_core::round_to;

pub fn fn_abs(args: &[f64]) -> ExprResult<f64> {
    Ok(args[0].abs())
}

pub fn fn_sqrt(args: &[f64]) -> ExprResult<f64> {
    Ok(args[0].sqrt())
}

pub fn fn_cbrt(args: &[f64]) -> ExprResult<f64> {
    Ok(args[0].cbrt())
}

pub fn fn_exp(args: &[f64]) -> ExprResult<f64> {
    Ok(args[0].exp())
}

pub fn fn_ln(args: &[f64]) -> ExprResult<f64> {
    Ok(args[0].ln())
}

pub fn fn_log10(args: &[f64]) -> ExprResult<f64> {
    Ok(args[0].log10())
}

pub fn fn_log2(args: &[f64]) -> ExprResult<f64> {
    Ok(args[0].log2())
}

/// LOG function: natural log, or log to an explicit base
pub fn fn_log(args: &[f64]) -> ExprResult<f64> {
    let x = args[0];
    match args.get(1) {
        Some(base) => Ok(x.ln() / base.ln()),
        None => Ok(x.ln()),
    }
}

pub fn fn_sin(args: &[f64]) -> ExprResult<f64> {
    Ok(args[0].sin())
}

pub fn fn_cos(args: &[f64]) -> ExprResult<f64> {
    Ok(args[0].cos())
}

pub fn fn_tan(args: &[f64]) -> ExprResult<f64> {
    Ok(args[0].tan())
}

pub fn fn_asin(args: &[f64]) -> ExprResult<f64> {
    Ok(args[0].asin())
}

pub fn fn_acos(args: &[f64]) -> ExprResult<f64> {
    Ok(args[0].acos())
}

pub fn fn_atan(args: &[f64]) -> ExprResult<f64> {
    Ok(args[0].atan())
}

pub fn fn_atan2(args: &[f64]) -> ExprResult<f64> {
    Ok(args[0].atan2(args[1]))
}

pub fn fn_sinh(args: &[f64]) -> ExprResult<f64> {
    Ok(args[0].sinh())
}

pub fn fn_cosh(args: &[f64]) -> ExprResult<f64> {
    Ok(args[0].cosh())
}

pub fn fn_tanh(args: &[f64]) -> ExprResult<f64> {
    Ok(args[0].tanh())
}

pub fn fn_floor(args: &[f64]) -> ExprResult<f64> {
    Ok(args[0].floor())
}

pub fn fn_ceil(args: &[f64]) -> ExprResult<f64> {
    Ok(args[0].ceil())
}

/// SIGN function: -1, 0 or 1 (NaN stays NaN)
pub fn fn_sign(args: &[f64]) -> ExprResult<f64> {
    let x = args[0];
    if x == 0.0 || x.is_nan() {
        Ok(x)
    } else {
        Ok(x.signum())
    }
}

pub fn fn_pow(args: &[f64]) -> ExprResult<f64> {
    Ok(args[0].powf(args[1]))
}

/// ROUND function: half away from zero, optionally to a number of decimals
pub fn fn_round(args: &[f64]) -> ExprResult<f64> {
    let x = args[0];
    let digits = match args.get(1) {
        None => 0,
        Some(d) if d.fract() == 0.0 && (0.0..=15.0).contains(d) => *d as u32,
        Some(d) => {
            return Err(ExprError::Evaluation(format!(
                "round() digits must be an integer between 0 and 15, got {}",
                d
            )))
        }
    };

    Ok(round_to(x, digits))
}

/// MIN function
pub fn fn_min(args: &[f64]) -> ExprResult<f64> {
    Ok(args.iter().copied().fold(f64::INFINITY, f64::min))
}

/// MAX function
pub fn fn_max(args: &[f64]) -> ExprResult<f64> {
    Ok(args.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

/// HYPOT function: Euclidean norm of the arguments
pub fn fn_hypot(args: &[f64]) -> ExprResult<f64> {
    Ok(args.iter().map(|x| x * x).sum::<f64>().sqrt())
}
