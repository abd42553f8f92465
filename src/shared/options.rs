//! Zentrale Konfiguration des Interaktionskerns.
//!
//! `InteractionOptions` enthält die host-seitig änderbaren Werte (Prefabs,
//! optionale Visualisierungen, Bildschirmdichte des Replay-Hosts).
//! Die geometrischen Konstanten sind feste `const`-Werte.

use serde::{Deserialize, Serialize};

// ── Elevation ───────────────────────────────────────────────────────

/// Skalierung Drag-Zoll → Welteinheiten bei der Elevation.
pub const ELEVATION_SCALE: f32 = 0.25;

// ── Platzierung ─────────────────────────────────────────────────────

/// Schwelle des Rückseiten-Tests: Treffer mit kleinerem Skalarprodukt werden verworfen.
pub const BACK_FACE_DOT_THRESHOLD: f32 = 0.0;
/// Standard-Prefab des sichtbaren Modells.
pub const VISUAL_MODEL_PREFAB: &str = "placement_object";
/// Standard-Prefab des Interaktions-Wrappers.
pub const INTERACTION_WRAPPER_PREFAB: &str = "interactable";

// ── Host ────────────────────────────────────────────────────────────

/// Standard-Bildschirmdichte (Pixel pro Zoll) für Hosts ohne eigene Angabe.
pub const DEFAULT_SCREEN_DPI: f32 = 160.0;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle vom Host änderbaren Optionen.
/// Wird als `ar_object_placement.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteractionOptions {
    /// Prefab-Name des sichtbaren Modells
    pub visual_model_prefab: String,
    /// Prefab-Name des Interaktions-Wrappers
    pub interaction_wrapper_prefab: String,
    /// Wrapper erhalten einen Selektions-Indikator als Kind-Knoten
    #[serde(default = "default_true")]
    pub selection_indicator: bool,
    /// Wrapper erhalten eine Elevations-Linie
    #[serde(default = "default_true")]
    pub elevation_line: bool,
    /// Bildschirmdichte für Hosts ohne eigene Angabe
    #[serde(default = "default_screen_dpi")]
    pub screen_dpi: f32,
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self {
            visual_model_prefab: VISUAL_MODEL_PREFAB.to_string(),
            interaction_wrapper_prefab: INTERACTION_WRAPPER_PREFAB.to_string(),
            selection_indicator: true,
            elevation_line: true,
            screen_dpi: DEFAULT_SCREEN_DPI,
        }
    }
}

/// Serde-Default für die optionalen Visualisierungen.
fn default_true() -> bool {
    true
}

/// Serde-Default für `screen_dpi` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_screen_dpi() -> f32 {
    DEFAULT_SCREEN_DPI
}

impl InteractionOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("ar_object_placement"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("ar_object_placement.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_falls_back_to_defaults_for_missing_fields() {
        let opts: InteractionOptions = toml::from_str(
            r#"
            visual_model_prefab = "chair"
            interaction_wrapper_prefab = "chair_wrapper"
            "#,
        )
        .expect("TOML sollte parsebar sein");

        assert_eq!(opts.visual_model_prefab, "chair");
        assert!(opts.selection_indicator);
        assert!(opts.elevation_line);
        assert_eq!(opts.screen_dpi, DEFAULT_SCREEN_DPI);
    }

    #[test]
    fn save_and_load_preserve_values() {
        let dir = std::env::temp_dir().join(format!("ar_opts_{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("Temp-Verzeichnis anlegbar");
        let path = dir.join("options.toml");

        let opts = InteractionOptions {
            elevation_line: false,
            screen_dpi: 401.0,
            ..InteractionOptions::default()
        };
        opts.save_to_file(&path).expect("Speichern sollte funktionieren");

        let loaded = InteractionOptions::load_from_file(&path);
        assert_eq!(loaded, opts);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let loaded = InteractionOptions::load_from_file(std::path::Path::new(
            "/nonexistent/ar_object_placement.toml",
        ));
        assert_eq!(loaded, InteractionOptions::default());
    }
}
