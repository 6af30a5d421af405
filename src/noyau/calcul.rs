// src/noyau/calcul.rs
//
// Moteur numérique (f64), sans évaluateur dynamique :
// 1) groupes les plus internes d’abord : chaque "( ... )" sans parenthèse intérieure
//    est remplacé par sa valeur, jusqu’à ce qu’il n’en reste plus
// 2) expression plate : opérandes et opérateurs alternés
//    - passe 1 : * et / de gauche à droite
//    - passe 2 : + et - de gauche à droite
//
// Garde-fous : division par zéro exact, toute valeur non finie (intermédiaire ou finale).

use super::erreurs::ErreurEvaluation;
use super::jetons::Tok;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    Plus,
    Minus,
    Star,
    Slash,
}

fn op_de(t: &Tok) -> Option<Op> {
    match t {
        Tok::Plus => Some(Op::Plus),
        Tok::Minus => Some(Op::Minus),
        Tok::Star => Some(Op::Star),
        Tok::Slash => Some(Op::Slash),
        _ => None,
    }
}

fn fini(x: f64) -> Result<f64, ErreurEvaluation> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(ErreurEvaluation::ResultatNonFini)
    }
}

/// Calcule une suite de jetons déjà substituée (plus d’identifiant).
pub fn calculer(tokens: &[Tok]) -> Result<f64, ErreurEvaluation> {
    let mut toks: Vec<Tok> = tokens.to_vec();

    // première ')' => le '(' le plus proche avant elle ferme un groupe sans parenthèse intérieure
    while let Some(fin) = toks.iter().position(|t| matches!(t, Tok::RPar)) {
        let debut = toks[..fin]
            .iter()
            .rposition(|t| matches!(t, Tok::LPar))
            .ok_or(ErreurEvaluation::ParenthesesDesequilibrees)?;

        let v = calculer_plat(&toks[debut + 1..fin])?;
        toks.splice(debut..=fin, [Tok::Val(v)]);
    }

    if toks.iter().any(|t| matches!(t, Tok::LPar)) {
        return Err(ErreurEvaluation::ParenthesesDesequilibrees);
    }

    calculer_plat(&toks)
}

fn valeur(t: &Tok) -> Result<f64, ErreurEvaluation> {
    match t {
        Tok::Num(txt) => {
            let v = txt
                .parse::<f64>()
                .map_err(|_| ErreurEvaluation::NombreMalForme(txt.clone()))?;
            fini(v)
        }
        Tok::Val(v) => fini(*v),
        _ => Err(ErreurEvaluation::SequenceOperateurs),
    }
}

/// Expression sans parenthèse. Un signe en tête est admis (contenu d’un groupe "( - 3)").
fn calculer_plat(toks: &[Tok]) -> Result<f64, ErreurEvaluation> {
    let (signe, reste) = match toks.first() {
        Some(Tok::Minus) => (-1.0, &toks[1..]),
        Some(Tok::Plus) => (1.0, &toks[1..]),
        _ => (1.0, toks),
    };

    // découpe en opérandes / opérateurs alternés
    let mut valeurs: Vec<f64> = Vec::with_capacity(reste.len() / 2 + 1);
    let mut ops: Vec<Op> = Vec::with_capacity(reste.len() / 2);
    let mut attend_operande = true;

    for t in reste {
        if attend_operande {
            valeurs.push(valeur(t)?);
            attend_operande = false;
        } else {
            let op = op_de(t).ok_or(ErreurEvaluation::SequenceOperateurs)?;
            ops.push(op);
            attend_operande = true;
        }
    }

    // vide, ou opérateur final
    if attend_operande {
        return Err(ErreurEvaluation::SequenceOperateurs);
    }

    valeurs[0] *= signe;

    // passe 1 : * /
    let mut termes: Vec<f64> = Vec::with_capacity(valeurs.len());
    let mut ops_add: Vec<Op> = Vec::with_capacity(ops.len());
    termes.push(valeurs[0]);

    for (op, &v) in ops.iter().zip(&valeurs[1..]) {
        match op {
            Op::Star | Op::Slash => {
                let Some(acc) = termes.last_mut() else {
                    return Err(ErreurEvaluation::SequenceOperateurs);
                };
                *acc = if *op == Op::Star {
                    fini(*acc * v)?
                } else {
                    if v == 0.0 {
                        return Err(ErreurEvaluation::DivisionParZero);
                    }
                    fini(*acc / v)?
                };
            }
            Op::Plus | Op::Minus => {
                ops_add.push(*op);
                termes.push(v);
            }
        }
    }

    // passe 2 : + -
    let mut acc = termes[0];
    for (op, &v) in ops_add.iter().zip(&termes[1..]) {
        acc = match op {
            Op::Plus => fini(acc + v)?,
            _ => fini(acc - v)?,
        };
    }

    fini(acc)
}
