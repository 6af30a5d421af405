//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le noyau sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant pavé : jamais deux opérateurs collés, jamais deux '.' dans un nombre
//! - invariant calcul : une expression entièrement parenthésée donne la même valeur f64
//!   que le calcul direct (même ordre d’opérations)

use std::time::{Duration, Instant};

use super::erreurs::ErreurEvaluation;
use super::eval::eval_expression;
use super::saisie::Operateur;
use super::session::{Cause, Session, Touche};
use super::variables::TableVariables;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Invariants texte ------------------------ */

fn est_op(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/')
}

fn check_invariants_expression(expr: &str) {
    let serre: Vec<char> = expr.chars().filter(|c| !c.is_whitespace()).collect();
    for w in serre.windows(2) {
        assert!(
            !(est_op(w[0]) && est_op(w[1])),
            "deux opérateurs collés dans {expr:?}"
        );
    }
    for nombre in expr.split(|c: char| !(c.is_ascii_digit() || c == '.')) {
        assert!(
            nombre.matches('.').count() <= 1,
            "plusieurs points dans {nombre:?} ({expr:?})"
        );
    }
}

/* ------------------------ Génération ------------------------ */

fn gen_touche(rng: &mut Rng) -> Touche {
    match rng.pick(14) {
        0..=4 => Touche::Chiffre(char::from(b'0' + rng.pick(10) as u8)),
        5 => Touche::Point,
        6 => Touche::Operateur(Operateur::Plus),
        7 => Touche::Operateur(Operateur::Moins),
        8 => Touche::Operateur(Operateur::Fois),
        9 => Touche::Operateur(Operateur::Divise),
        10 => Touche::ParOuvrante,
        11 => Touche::ParFermante,
        12 => match rng.pick(6) {
            0 => Touche::Retour,
            1 => Touche::Effacer,
            _ => Touche::Egal,
        },
        _ => Touche::Variable("v".to_string()),
    }
}

fn gen_feuille(rng: &mut Rng) -> (String, f64) {
    let n = rng.pick(20) as f64;
    if rng.pick(3) == 0 {
        let txt = format!("{n}.5");
        let v = txt.parse::<f64>().unwrap_or(0.0);
        (txt, v)
    } else {
        (format!("{n}"), n)
    }
}

/// (texte entièrement parenthésé, valeur attendue) ; None si division par zéro en route.
fn gen_expr(rng: &mut Rng, depth: usize) -> (String, Option<f64>) {
    if depth == 0 || rng.pick(4) == 0 {
        let (t, v) = gen_feuille(rng);
        return (t, Some(v));
    }

    let (ta, va) = gen_expr(rng, depth - 1);
    let (tb, vb) = gen_expr(rng, depth - 1);
    let (sym, v) = match rng.pick(4) {
        0 => ('+', va.zip(vb).map(|(a, b)| a + b)),
        1 => ('-', va.zip(vb).map(|(a, b)| a - b)),
        2 => ('*', va.zip(vb).map(|(a, b)| a * b)),
        _ => (
            '/',
            va.zip(vb).and_then(|(a, b)| if b == 0.0 { None } else { Some(a / b) }),
        ),
    };
    (format!("({ta} {sym} {tb})"), v)
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_pave_respecte_les_invariants() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let mut vars = TableVariables::new();
    vars.insert("v".to_string(), 2.5);

    let mut rng = Rng::new(0xC0FFEE_u64);
    let mut refus = 0usize;
    let mut evalues = 0usize;

    for _ in 0..200 {
        budget(t0, max);
        let mut s = Session::new();

        for _ in 0..40 {
            let avant = s.expression().to_string();
            let touche = gen_touche(&mut rng);
            let egal = matches!(touche, Touche::Egal);

            match s.appuyer(touche, &vars) {
                Ok(()) => {
                    if egal && !s.expression().is_empty() {
                        evalues += 1;
                    }
                }
                Err(a) => {
                    if let Cause::Saisie(_) = a.cause {
                        refus += 1;
                        // refus => expression intacte, même juste après un résultat
                        assert_eq!(s.expression(), avant, "refus a modifié {avant:?}");
                    }
                }
            }

            check_invariants_expression(s.expression());
        }
    }

    // On veut voir un mix, sinon le fuzz ne “balaye” rien.
    assert!(refus > 50, "trop peu de refus: {refus}");
    assert!(evalues > 10, "trop peu d’évaluations: {evalues}");
}

#[test]
fn fuzz_safe_calcul_conforme_au_direct() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let vide = TableVariables::new();
    let mut rng = Rng::new(0xBADC0DE_u64);

    let mut vu_ok = 0usize;
    let mut vu_div0 = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let (expr, attendu) = gen_expr(&mut rng, 5);
        match (eval_expression(&expr, &vide), attendu) {
            (Ok(v), Some(a)) => {
                assert_eq!(v.to_bits(), a.to_bits(), "expr={expr:?}");
                vu_ok += 1;
            }
            (Err(ErreurEvaluation::DivisionParZero), None) => vu_div0 += 1,
            (obtenu, attendu) => {
                panic!("expr={expr:?} obtenu={obtenu:?} attendu={attendu:?}")
            }
        }
    }

    assert!(vu_ok > 50, "trop peu de succès: {vu_ok}");
    assert!(vu_div0 > 0, "aucune division par zéro vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_determinisme() {
    let vars: TableVariables = [("a".to_string(), 0.1), ("b".to_string(), 3.0)]
        .into_iter()
        .collect();

    let mut rng = Rng::new(42);
    for _ in 0..100 {
        let (expr, _) = gen_expr(&mut rng, 4);
        let expr = expr.replacen('1', "a", 1).replacen('3', "b", 1);
        assert_eq!(
            eval_expression(&expr, &vars),
            eval_expression(&expr, &vars),
            "expr={expr:?}"
        );
    }
}

#[test]
fn fuzz_safe_imbrication_profonde() {
    let t0 = Instant::now();
    let max = Duration::from_secs(1);

    // 300 niveaux : le moteur est itératif, pas de pile qui explose
    let expr = format!("{}1{}", "(".repeat(300), " + 1)".repeat(300));
    budget(t0, max);

    assert_eq!(eval_expression(&expr, &TableVariables::new()), Ok(301.0));
}
