//! Shared fixtures: the cmip6plus schema from `tests/fixtures/specs` and an
//! in-memory vocabulary covering the terms the suites use.

#![allow(dead_code)]

use camino::Utf8PathBuf;
use drskit_domain::InMemoryTermOracle;
use drskit_specs::FsSpecificationStore;
use std::collections::BTreeMap;

pub const PROJECT: &str = "cmip6plus";

pub fn specs_root() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("workspace root")
        .join("tests")
        .join("fixtures")
        .join("specs")
}

pub fn store() -> FsSpecificationStore {
    FsSpecificationStore::new(specs_root())
}

pub fn oracle() -> InMemoryTermOracle {
    InMemoryTermOracle::new()
        .with_terms(PROJECT, "mip_era", ["CMIP6Plus"])
        .with_terms(PROJECT, "activity_id", ["CMIP", "ScenarioMIP"])
        .with_terms(PROJECT, "institution_id", ["IPSL", "NCC", "UA", "MIROC"])
        .with_terms(PROJECT, "source_id", ["MIROC6", "IPSL-CM6A-LR"])
        .with_terms(PROJECT, "experiment_id", ["amip", "historical"])
        .with_terms(PROJECT, "member_id", ["r2i2p1f2", "r1i1p1f1"])
        .with_terms(PROJECT, "table_id", ["ACmon", "Amon"])
        .with_terms(PROJECT, "variable_id", ["od550aer", "tas"])
        .with_terms(PROJECT, "grid_label", ["gn", "gr"])
        .with_terms(PROJECT, "time_range", ["201211-201212", "185001-201412"])
        .with_terms(PROJECT, "version", ["v20190923"])
}

pub const DATASET_ID: &str = "CMIP6Plus.CMIP.IPSL.MIROC6.amip.r2i2p1f2.ACmon.od550aer.gn";
pub const DIRECTORY: &str = "CMIP6Plus/CMIP/NCC/MIROC6/amip/r2i2p1f2/ACmon/od550aer/gn/v20190923";
pub const FILE_NAME: &str = "od550aer_ACmon_MIROC6_amip_r2i2p1f2_gn_201211-201212.nc";

/// A complete, compliant file name mapping.
pub fn file_name_mapping() -> BTreeMap<String, String> {
    [
        ("variable_id", "od550aer"),
        ("table_id", "ACmon"),
        ("source_id", "MIROC6"),
        ("experiment_id", "amip"),
        ("member_id", "r2i2p1f2"),
        ("grid_label", "gn"),
        ("time_range", "201211-201212"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}
