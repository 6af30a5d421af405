// src/noyau/controle.rs
//
// Validation structurelle (après substitution), indépendante de la discipline du pavé :
// une expression construite à la main doit être refusée pareil.
//
// Ordre des contrôles (le premier échec gagne) :
// 1) opérateurs : pas deux de suite, pas en tête, pas en fin
// 2) parenthèses : autant de '(' que de ')', jamais ')' avant son '(', pas de "()"
// 3) nombres : au plus un '.', au moins un chiffre

use super::erreurs::ErreurEvaluation;
use super::jetons::Tok;

pub fn controler(tokens: &[Tok]) -> Result<(), ErreurEvaluation> {
    controler_operateurs(tokens)?;
    controler_parentheses(tokens)?;
    controler_nombres(tokens)
}

fn controler_operateurs(tokens: &[Tok]) -> Result<(), ErreurEvaluation> {
    let en_tete = tokens.first().is_some_and(Tok::est_operateur);
    let en_fin = tokens.last().is_some_and(Tok::est_operateur);
    let double = tokens
        .windows(2)
        .any(|w| w[0].est_operateur() && w[1].est_operateur());

    if en_tete || en_fin || double {
        return Err(ErreurEvaluation::SequenceOperateurs);
    }
    Ok(())
}

fn controler_parentheses(tokens: &[Tok]) -> Result<(), ErreurEvaluation> {
    let mut profondeur: i64 = 0;
    for t in tokens {
        match t {
            Tok::LPar => profondeur += 1,
            Tok::RPar => {
                profondeur -= 1;
                if profondeur < 0 {
                    return Err(ErreurEvaluation::ParenthesesDesequilibrees);
                }
            }
            _ => {}
        }
    }
    if profondeur != 0 {
        return Err(ErreurEvaluation::ParenthesesDesequilibrees);
    }

    let vide = tokens
        .windows(2)
        .any(|w| matches!((&w[0], &w[1]), (Tok::LPar, Tok::RPar)));
    if vide {
        return Err(ErreurEvaluation::ParenthesesDesequilibrees);
    }
    Ok(())
}

fn controler_nombres(tokens: &[Tok]) -> Result<(), ErreurEvaluation> {
    for t in tokens {
        if let Tok::Num(txt) = t {
            let points = txt.chars().filter(|c| *c == '.').count();
            let chiffres = txt.chars().any(|c| c.is_ascii_digit());
            if points > 1 || !chiffres {
                return Err(ErreurEvaluation::NombreMalForme(txt.clone()));
            }
        }
    }
    Ok(())
}
