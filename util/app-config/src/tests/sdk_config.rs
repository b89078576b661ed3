use ckb_error::ErrorKind;
use ckb_tx_builder::FeeSettings;
use ckb_types::{
    address::NetworkType,
    core::{DepType, FeeRate, KnownScript, KnownScripts, ScriptHashType},
    packed::{Byte32, CellDep, OutPoint},
};

use crate::{ConfigError, SdkConfig};

const OMNI_LOCK: &str = r#"
network = "mainnet"

[fee]
min_fee_rate = 1500

[[scripts]]
name = "OmniLock"
code_hash = "0x9b819793a64463aed77c615d6cb226eea5487ccfc0783043a587254cda2b6f26"
hash_type = "type"
cell_deps = [
    { out_point = { tx_hash = "0xc76edf469816aa22f416503c38d0b533d2a018e253e379f134c3985b3472c842", index = 0 }, dep_type = "code" },
]
"#;

#[test]
fn empty_document_uses_defaults() {
    let config = SdkConfig::from_toml("").unwrap();
    assert_eq!(config.network, NetworkType::Testnet);
    assert_eq!(config.fee_settings(), FeeSettings::default());
    assert_eq!(
        config.known_scripts(),
        KnownScripts::builtin(NetworkType::Testnet)
    );
}

#[test]
fn scripts_overlay_the_genesis_ones() {
    let config = SdkConfig::from_toml(OMNI_LOCK).unwrap();
    assert_eq!(config.network, NetworkType::Mainnet);
    assert_eq!(config.fee_settings().min_fee_rate, FeeRate::from_u64(1500));
    assert_eq!(config.fee_settings().max_iterations, 32);

    let known = config.known_scripts();
    let omni_lock = known.get(KnownScript::OmniLock).unwrap();
    assert_eq!(omni_lock.hash_type, ScriptHashType::Type);
    assert_eq!(
        omni_lock.cell_deps,
        vec![CellDep::new(
            OutPoint::new(
                "0xc76edf469816aa22f416503c38d0b533d2a018e253e379f134c3985b3472c842"
                    .parse::<Byte32>()
                    .unwrap(),
                0
            ),
            DepType::Code
        )]
    );
    assert_eq!(
        known.get(KnownScript::Secp256k1Blake160),
        KnownScripts::builtin(NetworkType::Mainnet).get(KnownScript::Secp256k1Blake160)
    );
    assert!(config.script(KnownScript::NostrLock).is_none());
}

#[test]
fn invalid_documents() {
    let kind_of = |content: &str| SdkConfig::from_toml(content).unwrap_err().kind();

    assert_eq!(kind_of("network = \"devnet\""), ErrorKind::Config);
    assert_eq!(kind_of("fee_rate = 1000"), ErrorKind::Config);
    assert_eq!(kind_of("[fee]\nmax_iterations = 0"), ErrorKind::Config);

    let twice = format!("{OMNI_LOCK}{}", &OMNI_LOCK[OMNI_LOCK.find("[[scripts]]").unwrap()..]);
    let err = SdkConfig::from_toml(&twice).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::DuplicateScript(KnownScript::OmniLock))
    );

    let bad_hash = OMNI_LOCK.replace("0x9b81", "0x9b8");
    assert_eq!(kind_of(&bad_hash), ErrorKind::Config);
}

#[test]
fn missing_file() {
    let err = SdkConfig::load(std::path::Path::new("/nonexistent/ckb-tx-kit.toml")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Io { .. })
    ));
}
