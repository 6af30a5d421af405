// src/noyau/variables.rs
//
// Table de variables : nom -> valeur finie.
// Le noyau ne fait que lire la table (instantané par évaluation) ;
// seules les règles d’ajout vivent ici, la persistance est dans app/magasin.rs.

use std::collections::BTreeMap;

use super::erreurs::ErreurVariable;

pub type TableVariables = BTreeMap<String, f64>;

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn nom_valide(nom: &str) -> bool {
    let mut it = nom.chars();
    match it.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    it.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Valeur saisie dans le panneau : non vide, numérique, finie.
pub fn lire_valeur(texte: &str) -> Result<f64, ErreurVariable> {
    let t = texte.trim();
    if t.is_empty() {
        return Err(ErreurVariable::ValeurVide);
    }
    match t.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ErreurVariable::ValeurNonNumerique),
    }
}

/// Ajoute (ou remplace) une variable après validation du nom et de la valeur.
/// La table n’est modifiée que si tout est valide.
pub fn definir(
    table: &mut TableVariables,
    nom: &str,
    valeur: &str,
) -> Result<(), ErreurVariable> {
    let nom = nom.trim();
    if !nom_valide(nom) {
        return Err(ErreurVariable::NomInvalide);
    }
    let v = lire_valeur(valeur)?;
    table.insert(nom.to_string(), v);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noms() {
        assert!(nom_valide("x"));
        assert!(nom_valide("_taux2"));
        assert!(nom_valide("TVA_20"));
        assert!(!nom_valide(""));
        assert!(!nom_valide("2x"));
        assert!(!nom_valide("a-b"));
        assert!(!nom_valide("é"));
    }

    #[test]
    fn definir_valide_puis_remplace() {
        let mut t = TableVariables::new();
        definir(&mut t, " prix ", "12.5").unwrap();
        assert_eq!(t.get("prix"), Some(&12.5));
        definir(&mut t, "prix", "-3").unwrap();
        assert_eq!(t.get("prix"), Some(&-3.0));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn definir_refuse_sans_toucher_la_table() {
        let mut t = TableVariables::new();
        assert_eq!(definir(&mut t, "1a", "2"), Err(ErreurVariable::NomInvalide));
        assert_eq!(definir(&mut t, "a", "  "), Err(ErreurVariable::ValeurVide));
        assert_eq!(
            definir(&mut t, "a", "douze"),
            Err(ErreurVariable::ValeurNonNumerique)
        );
        assert_eq!(
            definir(&mut t, "a", "inf"),
            Err(ErreurVariable::ValeurNonNumerique)
        );
        assert!(t.is_empty());
    }
}
