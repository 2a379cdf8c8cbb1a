//! End-to-end builds through `TargetBuilder`.

#![allow(clippy::unwrap_used)]

use targetgeo::builder::recipe_for;
use targetgeo::config::{ExperimentType, OverlapPolicy, TargetConfig, TargetType};
use targetgeo::error::SceneError;
use targetgeo::scene::GeometryStore;
use targetgeo::solid::{Primitive, SolidKind};
use targetgeo::{BuildError, Result, TargetBuilder};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("targetgeo=warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
}

fn config_for(experiment: ExperimentType) -> TargetConfig {
    let target = match experiment {
        ExperimentType::Tdis | ExperimentType::Ndvcs | ExperimentType::Sidis | ExperimentType::Gen => TargetType::He3,
        _ => TargetType::Lh2,
    };
    TargetConfig {
        experiment,
        target,
        ..TargetConfig::default()
    }
}

fn tube_half_length(store: &GeometryStore, name: &str) -> f64 {
    let id = store.volume_by_name(name).unwrap();
    match store.volume(id).unwrap().solid.kind() {
        SolidKind::Primitive(Primitive::Tube(tube)) => tube.dz,
        other => panic!("{name} is not a tube: {other:?}"),
    }
}

fn placement_names(store: &GeometryStore, volume: &str) -> Vec<String> {
    let id = store.volume_by_name(volume).unwrap();
    store
        .children(id)
        .iter()
        .map(|p| store.placement(*p).unwrap().name.clone())
        .collect()
}

#[test]
fn reference_cryotarget_in_the_standard_chamber() -> Result<()> {
    init_tracing();
    let mut builder = TargetBuilder::new(TargetConfig::default())?;
    builder.build()?;
    let store = builder.store();

    assert_eq!(
        placement_names(store, "TargetMother_log"),
        ["uwindow_phys", "TargetCell_phys", "TargetWall_phys", "dwindow_phys"]
    );
    assert!((tube_half_length(store, "TargetCell_log") - 300.0).abs() < 1e-9);
    assert!((tube_half_length(store, "TargetMother_log") - 300.125).abs() < 1e-9);
    for name in ["TargetCell_log", "TargetWall_log", "uwindow_log", "dwindow_log", "ScatChamber_log"] {
        assert!(builder.is_target_volume(name), "{name}");
    }
    assert!(!builder.is_target_volume("TargetMother_log"));
    Ok(())
}

#[test]
fn every_experiment_builds_with_the_standard_materials() {
    init_tracing();
    for experiment in ExperimentType::ALL {
        let mut builder = TargetBuilder::new(config_for(experiment)).unwrap();
        let world = builder
            .build()
            .unwrap_or_else(|err| panic!("{experiment:?} failed: {err}"));
        let store = builder.store();
        assert!(!store.children(world).is_empty(), "{experiment:?} placed nothing");
        assert!(!builder.targets().is_empty(), "{experiment:?} registered no target volume");
    }
}

#[test]
fn every_experiment_and_target_pair_builds_or_is_refused_up_front() {
    init_tracing();
    let mut supported = 0;
    for experiment in ExperimentType::ALL {
        for target in TargetType::ALL {
            let config = TargetConfig {
                experiment,
                target,
                ..TargetConfig::default()
            };
            let mut builder = TargetBuilder::new(config).unwrap();
            let result = builder.build();
            if recipe_for(experiment, target).is_ok() {
                supported += 1;
                result.unwrap_or_else(|err| panic!("{experiment:?} with {target:?} failed: {err}"));
            } else {
                assert!(
                    matches!(result, Err(BuildError::Config(_))),
                    "{experiment:?} with {target:?} was not refused"
                );
                assert_eq!(builder.store().volume_count(), 1, "{experiment:?} with {target:?}");
                assert_eq!(builder.store().placement_count(), 0);
            }
        }
    }
    // 3 standard chambers x 5, GEp x 2 x 3, C16 4, TDIS/nDVCS x 2 x 5, GEn 1, SIDIS 7
    assert_eq!(supported, 15 + 6 + 4 + 10 + 1 + 7);
}

#[test]
fn no_target_leaves_the_chamber_empty() -> Result<()> {
    init_tracing();
    let config = TargetConfig::from_toml_str("experiment = \"gmn\"\ntarget = \"none\"\n")?;
    let mut builder = TargetBuilder::new(config)?;
    builder.build()?;
    let store = builder.store();
    assert!(placement_names(store, "ScatChamber_log").is_empty());
    for name in ["TargetMother_log", "TargetCell_log", "Target_log"] {
        assert!(store.volume_by_name(name).is_err(), "{name}");
    }
    assert!(builder.is_target_volume("ScatChamber_log"));
    Ok(())
}

#[test]
fn building_twice_without_reset_hits_a_duplicate_name() {
    init_tracing();
    let mut builder = TargetBuilder::new(config_for(ExperimentType::C16)).unwrap();
    builder.build().unwrap();
    let volumes = builder.store().volume_count();
    let err = builder.build().unwrap_err();
    assert!(matches!(err, BuildError::Scene(SceneError::DuplicateName(_))));
    assert_eq!(builder.store().volume_count(), volumes);
}

#[test]
fn reset_allows_a_clean_rebuild() {
    init_tracing();
    let mut builder = TargetBuilder::new(TargetConfig {
        flux_sphere: true,
        ..config_for(ExperimentType::Gep)
    })
    .unwrap();
    builder.build().unwrap();
    let (volumes, placements, targets) = (
        builder.store().volume_count(),
        builder.store().placement_count(),
        builder.targets().len(),
    );
    assert_eq!(builder.detectors().registrations().len(), 1);

    builder.reset().unwrap();
    assert_eq!(builder.store().volume_count(), 1);
    assert!(builder.targets().is_empty());
    assert!(builder.detectors().registrations().is_empty());

    builder.build().unwrap();
    assert_eq!(builder.store().volume_count(), volumes);
    assert_eq!(builder.store().placement_count(), placements);
    assert_eq!(builder.targets().len(), targets);
    // The FLUX detector is reused, not recreated.
    assert_eq!(builder.detectors().detector_count(), 1);
    assert_eq!(builder.detectors().registrations().len(), 1);
}

#[test]
fn switching_experiments_between_builds() {
    init_tracing();
    let mut builder = TargetBuilder::new(config_for(ExperimentType::Gmn)).unwrap();
    builder.build().unwrap();
    builder.reset().unwrap();
    builder.set_config(config_for(ExperimentType::Tdis)).unwrap();
    builder.build().unwrap();
    assert!(builder.store().volume_by_name("ScatChamber_log").is_err());
    assert!(builder.store().volume_by_name("TPCgas_log").is_ok());
}

#[test]
fn overlap_policy_never_silences_the_gen_checks() {
    init_tracing();
    let mut checked = TargetBuilder::new(config_for(ExperimentType::Gen)).unwrap();
    checked.build().unwrap();
    assert!(!checked.store().overlap_warnings().is_empty());

    let mut unchecked = TargetBuilder::new(TargetConfig {
        overlap_policy: OverlapPolicy::Never,
        ..config_for(ExperimentType::Gen)
    })
    .unwrap();
    unchecked.build().unwrap();
    assert!(unchecked.store().overlap_warnings().is_empty());
}

#[test]
fn toml_config_drives_the_build() -> Result<()> {
    init_tracing();
    let config = TargetConfig::from_toml_str(
        r#"
        experiment = "sidis"
        target = "h2"
        target_length = 400.0
        scattering_chamber = true
        "#,
    )?;
    let mut builder = TargetBuilder::new(config)?;
    builder.build()?;
    assert_eq!(
        placement_names(builder.store(), "sc_vacuum_log"),
        ["targ_tube_phys", "targ_cap_phys1", "targ_cap_phys2", "gas_tube_phys"]
    );
    assert!((tube_half_length(builder.store(), "gas_tube_log") - 200.0).abs() < 1e-9);
    Ok(())
}
