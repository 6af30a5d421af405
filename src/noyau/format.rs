// src/noyau/format.rs
//
// Affichage d’un résultat : au plus DECIMALES_AFFICHAGE chiffres après la virgule,
// zéros finaux retirés. L’arrondi se fait en exact (f64 -> rationnel), pas en flottant,
// sur la valeur réellement stockée (1.0005 vaut 1.000499999… en binaire).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

/// Nombre de décimales affichées (réglage unique du noyau).
pub const DECIMALES_AFFICHAGE: usize = 3;

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal.
pub fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    if digits == 0 {
        return if neg {
            format!("-{int_part}")
        } else {
            format!("{int_part}")
        };
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    if neg {
        format!("-{int_part}.{frac}")
    } else {
        format!("{int_part}.{frac}")
    }
}

/// r -> entier “scalé” = round(r * 10^digits), moitié loin de zéro.
fn rational_scaled_round(r: &BigRational, digits: usize) -> BigInt {
    let scale = BigRational::from_integer(pow10(digits));
    (r * scale).round().to_integer()
}

/// Retire les zéros finaux (et le point s’il ne reste rien derrière).
fn sans_zeros_finaux(mut s: String) -> String {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}

/// Texte d’affichage d’une valeur. `None` si la valeur n’est pas finie.
pub fn formater_resultat(v: f64) -> Option<String> {
    formater_avec(v, DECIMALES_AFFICHAGE)
}

pub fn formater_avec(v: f64, digits: usize) -> Option<String> {
    let r = BigRational::from_float(v)?;
    let scaled = rational_scaled_round(&r, digits);

    // -0.0004 arrondi => 0, pas "-0"
    if scaled.is_zero() {
        return Some("0".to_string());
    }

    Some(sans_zeros_finaux(scaled_to_decimal(scaled, digits)))
}
