//! Rampes de couleurs continues : paramètre t ∈ [0, 1] → couleur sRGB

use palette::Srgb;

use super::schemes::Coefficients;
use crate::ChoroplethError;

/// Interpolateur d'une rampe publiée
#[derive(Debug, Clone, PartialEq)]
pub enum Ramp {
    /// Polynôme par canal, évalué par Horner
    Polynomial(Coefficients),

    /// B-spline uniforme RGB passant près des couleurs d'ancrage
    Basis(Vec<Srgb<f64>>),
}

impl Ramp {
    /// Construit une rampe B-spline depuis des couleurs CSS
    pub fn basis(stops: &[&str]) -> Result<Self, ChoroplethError> {
        if stops.len() < 2 {
            return Err(ChoroplethError::invalid_color(
                stops.join(","),
                "at least two anchor colors are required",
            ));
        }

        let colors = stops
            .iter()
            .map(|s| parse_color(s))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::Basis(colors))
    }

    /// Couleur au paramètre `t`, ramené dans [0, 1]
    pub fn at(&self, t: f64) -> Srgb<f64> {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Polynomial(coefficients) => eval_polynomial(coefficients, t),
            Self::Basis(stops) => eval_basis(stops, t),
        }
    }

    /// Couleur hexadécimale au paramètre `t`
    pub fn hex_at(&self, t: f64) -> String {
        to_hex(self.at(t))
    }
}

fn eval_polynomial(coefficients: &[[f64; 3]], t: f64) -> Srgb<f64> {
    let channel = |i: usize| {
        coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, c| acc * t + c[i])
    };
    Srgb::new(channel(0), channel(1), channel(2))
}

fn eval_basis(stops: &[Srgb<f64>], t: f64) -> Srgb<f64> {
    let n = stops.len() - 1;
    let i = if t >= 1.0 {
        n - 1
    } else {
        (t * n as f64).floor() as usize
    };

    let v1 = channels(stops[i]);
    let v2 = channels(stops[i + 1]);
    let v0 = if i > 0 {
        channels(stops[i - 1])
    } else {
        std::array::from_fn(|k| 2.0 * v1[k] - v2[k])
    };
    let v3 = if i < n - 1 {
        channels(stops[i + 2])
    } else {
        std::array::from_fn(|k| 2.0 * v2[k] - v1[k])
    };

    let local = (t - i as f64 / n as f64) * n as f64;
    let c: [f64; 3] = std::array::from_fn(|k| basis(local, v0[k], v1[k], v2[k], v3[k]));
    Srgb::new(c[0], c[1], c[2])
}

/// Fonction de base B-spline cubique uniforme
fn basis(t1: f64, v0: f64, v1: f64, v2: f64, v3: f64) -> f64 {
    let t2 = t1 * t1;
    let t3 = t2 * t1;
    ((1.0 - 3.0 * t1 + 3.0 * t2 - t3) * v0
        + (4.0 - 6.0 * t2 + 3.0 * t3) * v1
        + (1.0 + 3.0 * t1 + 3.0 * t2 - 3.0 * t3) * v2
        + t3 * v3)
        / 6.0
}

fn channels(color: Srgb<f64>) -> [f64; 3] {
    [color.red, color.green, color.blue]
}

/// Parse une couleur CSS en sRGB
pub fn parse_color(color: &str) -> Result<Srgb<f64>, ChoroplethError> {
    let parsed = csscolorparser::parse(color)
        .map_err(|e| ChoroplethError::invalid_color(color, e.to_string()))?;

    Ok(Srgb::new(parsed.r as f64, parsed.g as f64, parsed.b as f64))
}

/// Convertit une couleur sRGB en `#rrggbb`
pub fn to_hex(color: Srgb<f64>) -> String {
    let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        byte(color.red),
        byte(color.green),
        byte(color.blue)
    )
}
