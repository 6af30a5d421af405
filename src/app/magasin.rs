//! src/app/magasin.rs
//!
//! Persistance des variables (hors noyau).
//!
//! Format : un objet JSON plat `{"nom": nombre, ...}`.
//! - NATIF : fichier (chemin = $CALC_VARS, sinon `calc-vars.json`)
//! - WEB   : localStorage["calc-vars"]
//!
//! Contrat : `charger()` ne panique jamais et ne renvoie jamais d’erreur ;
//! stockage absent ou corrompu => table vide, entrée invalide => ignorée.

use crate::noyau::variables::{nom_valide, TableVariables};

/// Clé localStorage (web).
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const CLE_STOCKAGE: &str = "calc-vars";

/// Fichier par défaut (natif).
#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
pub const FICHIER_VARIABLES: &str = "calc-vars.json";

/// Variable d’environnement qui remplace le chemin du fichier (natif).
#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
pub const ENV_CHEMIN: &str = "CALC_VARS";

pub trait MagasinVariables {
    fn charger(&self) -> TableVariables;
    fn sauver(&mut self, table: &TableVariables);
}

/// Texte stocké -> table. Tolérant : tout ce qui n’est pas (nom valide, nombre fini) saute.
pub fn decoder(texte: &str) -> TableVariables {
    let valeur: serde_json::Value = match serde_json::from_str(texte) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("variables illisibles, table vide: {e}");
            return TableVariables::new();
        }
    };

    let serde_json::Value::Object(objet) = valeur else {
        log::warn!("variables: objet JSON attendu, table vide");
        return TableVariables::new();
    };

    objet
        .into_iter()
        .filter_map(|(nom, v)| {
            let x = v.as_f64()?;
            if nom_valide(&nom) && x.is_finite() {
                Some((nom, x))
            } else {
                log::warn!("variable ignorée: {nom:?}");
                None
            }
        })
        .collect()
}

pub fn encoder(table: &TableVariables) -> String {
    serde_json::to_string(table).unwrap_or_else(|e| {
        log::warn!("encodage des variables impossible: {e}");
        "{}".to_string()
    })
}

/* ------------------------ Mémoire (tests / repli) ------------------------ */

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
#[derive(Clone, Debug, Default)]
pub struct MagasinMemoire {
    texte: Option<String>,
}

impl MagasinMemoire {
    #[cfg(test)]
    pub fn avec_texte(texte: &str) -> Self {
        Self {
            texte: Some(texte.to_string()),
        }
    }
}

impl MagasinVariables for MagasinMemoire {
    fn charger(&self) -> TableVariables {
        self.texte.as_deref().map(decoder).unwrap_or_default()
    }

    fn sauver(&mut self, table: &TableVariables) {
        self.texte = Some(encoder(table));
    }
}

/* ------------------------ NATIF : fichier JSON ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
pub use natif::MagasinFichier;

#[cfg(not(target_arch = "wasm32"))]
mod natif {
    use std::fs;
    use std::io::{self, ErrorKind};
    use std::path::{Path, PathBuf};

    use super::{decoder, encoder, MagasinVariables, ENV_CHEMIN, FICHIER_VARIABLES};
    use crate::noyau::variables::TableVariables;

    #[derive(Clone, Debug)]
    pub struct MagasinFichier {
        chemin: PathBuf,
    }

    impl MagasinFichier {
        pub fn new(chemin: impl Into<PathBuf>) -> Self {
            Self {
                chemin: chemin.into(),
            }
        }

        /// $CALC_VARS si défini, sinon `calc-vars.json` dans le dossier courant.
        pub fn depuis_env() -> Self {
            let chemin = std::env::var_os(ENV_CHEMIN)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(FICHIER_VARIABLES));
            log::info!("variables: {}", chemin.display());
            Self::new(chemin)
        }
    }

    impl MagasinVariables for MagasinFichier {
        fn charger(&self) -> TableVariables {
            match fs::read_to_string(&self.chemin) {
                Ok(texte) => decoder(&texte),
                Err(e) if e.kind() == ErrorKind::NotFound => TableVariables::new(),
                Err(e) => {
                    log::warn!("lecture {} impossible: {e}", self.chemin.display());
                    TableVariables::new()
                }
            }
        }

        fn sauver(&mut self, table: &TableVariables) {
            if let Err(e) = ecrire_atomique(&self.chemin, encoder(table).as_bytes()) {
                log::warn!("écriture {} impossible: {e}", self.chemin.display());
            }
        }
    }

    /// Fichier temporaire voisin : `<chemin>.tmp`.
    pub(super) fn chemin_temporaire(chemin: &Path) -> PathBuf {
        let mut nom = chemin.as_os_str().to_owned();
        nom.push(".tmp");
        PathBuf::from(nom)
    }

    /// Écrit dans le fichier voisin puis renomme : l’ancien contenu reste intact
    /// tant que le nouveau n’est pas complet.
    fn ecrire_atomique(chemin: &Path, contenu: &[u8]) -> io::Result<()> {
        if let Some(parent) = chemin.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = chemin_temporaire(chemin);
        let issue = fs::write(&tmp, contenu).and_then(|()| fs::rename(&tmp, chemin));
        if issue.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        issue
    }
}

/* ------------------------ WEB : localStorage ------------------------ */

#[cfg(target_arch = "wasm32")]
pub use web::MagasinNavigateur;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::Storage;

    use super::{decoder, encoder, MagasinVariables, CLE_STOCKAGE};
    use crate::noyau::variables::TableVariables;

    #[derive(Clone, Debug, Default)]
    pub struct MagasinNavigateur;

    fn stockage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    pub fn disponible() -> bool {
        stockage().is_some()
    }

    impl MagasinVariables for MagasinNavigateur {
        fn charger(&self) -> TableVariables {
            let texte = stockage().and_then(|s| s.get_item(CLE_STOCKAGE).ok().flatten());
            texte.as_deref().map(decoder).unwrap_or_default()
        }

        fn sauver(&mut self, table: &TableVariables) {
            let Some(s) = stockage() else {
                log::warn!("localStorage indisponible, variables non sauvées");
                return;
            };
            if s.set_item(CLE_STOCKAGE, &encoder(table)).is_err() {
                log::warn!("localStorage: écriture refusée");
            }
        }
    }
}

/// Magasin de la plateforme courante.
pub fn magasin_par_defaut() -> Box<dyn MagasinVariables> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        Box::new(MagasinFichier::depuis_env())
    }

    #[cfg(target_arch = "wasm32")]
    {
        if web::disponible() {
            Box::new(MagasinNavigateur)
        } else {
            log::warn!("localStorage indisponible, variables en mémoire seulement");
            Box::new(MagasinMemoire::default())
        }
    }
}
