// src/noyau/jetons.rs
//
// Tokenisation + substitution des variables au niveau des jetons.
// Pas de remplacement textuel : un identifiant est un mot entier, résolu (ou non) tel quel.

use super::erreurs::ErreurEvaluation;
use super::variables::{nom_valide, TableVariables};

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    // Texte brut d’un nombre (chiffres + points). Converti en f64 au calcul seulement,
    // pour que la validation puisse encore dire “nombre mal formé”.
    Num(String),

    // Valeur déjà connue : variable résolue ou groupe parenthésé déjà calculé.
    Val(f64),

    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,

    LPar,
    RPar,

    // Mot ou caractère hors grammaire (ex: "2x", "%", "é").
    Inconnu(String),
}

impl Tok {
    pub fn est_operateur(&self) -> bool {
        matches!(self, Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash)
    }
}

fn est_char_mot(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// Tokenize une chaîne en jetons (n’échoue jamais : l’inconnu devient `Tok::Inconnu`).
/// Supporte:
/// - nombres décimaux (ex: 12, 0.5, .5, 2.)
/// - un '-' collé à un nombre en tout début d’expression (ex: "-5", un résultat réutilisé)
/// - opérateurs + - * /
/// - parenthèses ( )
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (casse conservée)
pub fn tokenize(s: &str) -> Vec<Tok> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '*' => {
                out.push(Tok::Star);
                i += 1;
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '-' => {
                // "-5" en tête : littéral signé (continuation d’un résultat négatif)
                let colle = chars
                    .get(i + 1)
                    .is_some_and(|n| n.is_ascii_digit() || *n == '.');
                if out.is_empty() && colle {
                    let (mot, fin) = lire_mot(&chars, i + 1);
                    i = fin;
                    out.push(classer_mot(format!("-{mot}"), &mot));
                } else {
                    out.push(Tok::Minus);
                    i += 1;
                }
                continue;
            }
            _ => {}
        }

        if est_char_mot(c) {
            let (mot, fin) = lire_mot(&chars, i);
            i = fin;
            out.push(classer_mot(mot.clone(), &mot));
            continue;
        }

        out.push(Tok::Inconnu(c.to_string()));
        i += 1;
    }

    out
}

/// Mot maximal [A-Za-z0-9_.]+ à partir de `debut`. Retourne (mot, indice de fin).
fn lire_mot(chars: &[char], debut: usize) -> (String, usize) {
    let mut fin = debut;
    while fin < chars.len() && est_char_mot(chars[fin]) {
        fin += 1;
    }
    (chars[debut..fin].iter().collect(), fin)
}

/// `texte` = ce qui sera stocké, `mot` = le mot sans signe (pour le classement).
fn classer_mot(texte: String, mot: &str) -> Tok {
    if mot.chars().all(|c| c.is_ascii_digit() || c == '.') {
        Tok::Num(texte)
    } else if texte == mot && nom_valide(mot) {
        Tok::Ident(texte)
    } else {
        Tok::Inconnu(texte)
    }
}

/// Résout chaque identifiant contre la table (mot entier seulement).
/// Identifiant inconnu ou caractère hors grammaire => CaractereInvalide.
pub fn substituer(tokens: Vec<Tok>, vars: &TableVariables) -> Result<Vec<Tok>, ErreurEvaluation> {
    tokens
        .into_iter()
        .map(|t| match t {
            Tok::Ident(nom) => match vars.get(&nom) {
                Some(v) => Ok(Tok::Val(*v)),
                None => Err(ErreurEvaluation::CaractereInvalide(nom)),
            },
            Tok::Inconnu(s) => Err(ErreurEvaluation::CaractereInvalide(s)),
            autre => Ok(autre),
        })
        .collect()
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(txt) => txt.clone(),
            Tok::Val(v) => format!("{v}"),
            Tok::Ident(name) => name.clone(),
            Tok::Inconnu(s) => format!("?{s}"),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
