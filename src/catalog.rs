// src/catalog.rs

use crate::error::{AppError, Result};
use crate::models::ChampionsData;
use std::path::Path;
use tracing::info;

/// Loads and validates the static hero catalog. Read once at startup and
/// held in `AppState` for the lifetime of the process.
pub fn load_catalog(path: &Path) -> Result<ChampionsData> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::CatalogLoad {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let catalog: ChampionsData =
        serde_json::from_str(&content).map_err(|e| AppError::CatalogLoad {
            path: path.display().to_string(),
            message: format!("invalid JSON: {e}"),
        })?;

    if catalog.heroes.is_empty() {
        return Err(AppError::CatalogLoad {
            path: path.display().to_string(),
            message: "catalog contains no heroes".to_string(),
        });
    }

    info!(
        heroes = catalog.heroes.len(),
        lanes = catalog.lanes.len(),
        roles = catalog.roles.len(),
        "Hero catalog loaded"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn loads_valid_catalog() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "heroes": [{{
                    "id": "chou", "name": "Chou", "nameAr": "تشو",
                    "role": "Fighter", "roleAr": "مقاتل",
                    "lane": "exp", "laneAr": "ممر الخبرة",
                    "image": "chou.png"
                }}],
                "lanes": [{{"id": "exp", "name": "EXP Lane", "nameAr": "ممر الخبرة"}}],
                "roles": [{{"id": "fighter", "name": "Fighter", "nameAr": "مقاتل"}}]
            }}"#
        )
        .unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.heroes.len(), 1);
        assert_eq!(catalog.hero_by_id("chou").unwrap().name, "Chou");
    }

    #[test]
    fn missing_file_is_a_catalog_error() {
        let result = load_catalog(Path::new("/nonexistent/champions.json"));
        assert!(matches!(result, Err(AppError::CatalogLoad { .. })));
    }

    #[test]
    fn empty_hero_list_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"heroes": [], "lanes": [], "roles": []}}"#).unwrap();
        assert!(load_catalog(file.path()).is_err());
    }
}
