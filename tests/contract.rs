//! Integration tests for feature-contract validation.

use minado_classifiers::contract::FeatureContract;

fn full_columns() -> Vec<String> {
    [
        "fid",
        "tipo_punto",
        "DistMinas",
        "FID_Mina",
        "Minas1000m",
        "TipoCultivo",
        "Dist_NoComb",
        "Dens_NoComb",
        "Num_PrediosURT",
        "Tipo_Cobertura",
        "Tipo_Relieve",
        "Pendiente",
        "Aspecto",
        "Dist_Via",
        "Tipo_Via",
        "Dist_EventoCombatiente",
        "Dens_EventoCombatiente",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

// ---------------------------------------------------------------------------
// validate / missing_columns
// ---------------------------------------------------------------------------

#[test]
fn full_column_set_validates() {
    let contract = FeatureContract::confirmed_site();
    assert!(contract.validate(&full_columns()));
    assert!(contract.missing_columns(&full_columns()).is_empty());
}

#[test]
fn missing_feature_column_fails_validation() {
    let contract = FeatureContract::confirmed_site();
    let columns: Vec<String> = full_columns()
        .into_iter()
        .filter(|c| c != "DistMinas")
        .collect();
    assert!(!contract.validate(&columns));
    assert_eq!(contract.missing_columns(&columns), vec!["DistMinas"]);
}

#[test]
fn extra_columns_are_permitted() {
    let contract = FeatureContract::confirmed_site();
    let mut columns = full_columns();
    columns.push("Departamento".to_string());
    columns.push("Municipio".to_string());
    assert!(contract.validate(&columns), "extra columns must be ignored");
}

#[test]
fn identifier_columns_are_optional() {
    let contract = FeatureContract::confirmed_site();
    let columns: Vec<String> = full_columns()
        .into_iter()
        .filter(|c| c != "fid" && c != "FID_Mina")
        .collect();
    assert!(
        contract.validate(&columns),
        "dropped identifier columns must not be required"
    );
}

// ---------------------------------------------------------------------------
// labeled variant (evaluation path)
// ---------------------------------------------------------------------------

#[test]
fn labeled_validation_requires_the_target() {
    let contract = FeatureContract::confirmed_site();
    let columns: Vec<String> = full_columns()
        .into_iter()
        .filter(|c| c != "tipo_punto")
        .collect();
    assert!(
        contract.validate(&columns),
        "feature-only validation tolerates a missing label"
    );
    let missing = contract.missing_columns_labeled(&columns);
    assert_eq!(missing, vec!["tipo_punto"]);
}

#[test]
fn labeled_validation_passes_with_target_present() {
    let contract = FeatureContract::confirmed_site();
    assert!(contract.missing_columns_labeled(&full_columns()).is_empty());
}
