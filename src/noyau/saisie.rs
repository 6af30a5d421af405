// src/noyau/saisie.rs
//
// Accumulateur d’entrée : fait grandir le texte de l’expression touche par touche.
// Contrat : l’expression accumulée reste toujours une expression *candidate*
// (pas deux opérateurs collés, un seul '.' par nombre, parenthèses cohérentes),
// sinon la touche est refusée et le texte ne bouge pas.

use super::erreurs::ErreurSaisie;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
}

impl Operateur {
    pub fn symbole(self) -> char {
        match self {
            Operateur::Plus => '+',
            Operateur::Moins => '-',
            Operateur::Fois => '*',
            Operateur::Divise => '/',
        }
    }

    pub fn depuis_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operateur::Plus),
            '-' => Some(Operateur::Moins),
            '*' => Some(Operateur::Fois),
            '/' => Some(Operateur::Divise),
            _ => None,
        }
    }
}

/// Ce que l’accumulateur sait insérer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Saisie {
    Chiffre(char),
    Point,
    Operateur(Operateur),
    ParOuvrante,
    ParFermante,
    Nom(String),
}

fn est_operateur(c: char) -> bool {
    Operateur::depuis_char(c).is_some()
}

/// Nombre en cours : ce qui suit le dernier opérateur / parenthèse (espaces de tête ignorés).
fn nombre_en_cours(expr: &str) -> &str {
    let debut = expr
        .rfind(|c: char| est_operateur(c) || c == '(' || c == ')')
        .map(|i| i + 1)
        .unwrap_or(0);
    expr[debut..].trim_start()
}

/// Insère une saisie. `Ok(nouvelle expression)` ou refus typé (expression inchangée).
pub fn inserer(expr: &str, saisie: &Saisie) -> Result<String, ErreurSaisie> {
    let dernier = expr.chars().last();
    let dernier_non_blanc = expr.trim_end().chars().last();

    match saisie {
        Saisie::Operateur(op) => {
            if expr.trim().is_empty() {
                return Err(ErreurSaisie::OperateurEnTete);
            }
            if let Some(c) = dernier_non_blanc {
                if est_operateur(c) || c == '.' {
                    return Err(ErreurSaisie::OperateurDouble);
                }
            }
            Ok(format!("{expr} {} ", op.symbole()))
        }

        Saisie::Point => {
            if dernier_non_blanc == Some(')') {
                return Err(ErreurSaisie::PointMalPlace);
            }
            let nombre = nombre_en_cours(expr);
            if nombre.contains('.') {
                return Err(ErreurSaisie::PointDouble);
            }
            if !nombre.chars().all(|c| c.is_ascii_digit()) {
                return Err(ErreurSaisie::PointMalPlace);
            }
            Ok(format!("{expr}."))
        }

        Saisie::ParOuvrante => {
            if let Some(c) = dernier {
                if !(est_operateur(c) || c == '(' || c == ' ') {
                    return Err(ErreurSaisie::ParentheseOuvranteMalPlacee);
                }
            }
            Ok(format!("{expr}("))
        }

        Saisie::ParFermante => {
            let ouvrantes = expr.chars().filter(|c| *c == '(').count();
            let fermantes = expr.chars().filter(|c| *c == ')').count();
            if ouvrantes <= fermantes {
                return Err(ErreurSaisie::ParentheseFermanteOrpheline);
            }
            if let Some(c) = dernier {
                if est_operateur(c) || c == '(' || c == ' ' {
                    return Err(ErreurSaisie::ParentheseFermanteMalPlacee);
                }
            }
            Ok(format!("{expr})"))
        }

        Saisie::Chiffre(d) => Ok(format!("{expr}{d}")),
        Saisie::Nom(nom) => Ok(format!("{expr}{nom}")),
    }
}
