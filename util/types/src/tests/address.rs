use crate::{
    address::{Address, NetworkType},
    core::{KnownScripts, ScriptHashType, error::AddressError},
    packed::{Byte32, Script},
};

use super::secp_lock;

const ARGS: [u8; 20] = [
    0xb3, 0x9b, 0xbc, 0x0b, 0x36, 0x73, 0xc7, 0xd3, 0x64, 0x50, 0xbc, 0x14, 0xcf, 0xcd, 0xad, 0x2d,
    0x55, 0x9c, 0x6c, 0x64,
];
const FULL: &str = "ckb1qzda0cr08m85hc8jlnfp3zer7xulejywt49kt2rr0vthywaa50xwsqdnnw7qkdnnclfkg59uzn8umtfd2kwxceqxwquc4";

fn mainnet() -> KnownScripts {
    KnownScripts::builtin(NetworkType::Mainnet)
}

#[test]
fn full_format() {
    let address = Address::from_script(NetworkType::Mainnet, secp_lock(ARGS));
    assert_eq!(address.encode().unwrap(), FULL);
    assert_eq!(address.to_string(), FULL);
    assert_eq!(Address::decode(FULL, &mainnet()).unwrap(), address);
    assert_eq!(address.network(), Some(NetworkType::Mainnet));
}

#[test]
fn deprecated_formats() {
    let short = "ckb1qyqt8xaupvm8837nv3gtc9x0ekkj64vud3jqfwyw5v";
    let full_type = "ckb1qjda0cr08m85hc8jlnfp3zer7xulejywt49kt2rr0vthywaa50xw3vumhs9nvu786dj9p0q5elx66t24n3kxgj53qks";
    let expected = secp_lock(ARGS);
    assert_eq!(Address::decode(short, &mainnet()).unwrap().script, expected);
    assert_eq!(Address::decode(full_type, &mainnet()).unwrap().script, expected);

    // short format with an unknown code hash index
    assert_eq!(
        Address::decode("ckb1qyrm8xaupvm8837nv3gtc9x0ekkj64vud3jq0mj2l7", &mainnet()),
        Err(AddressError::UnknownCodeHashIndex(7))
    );
    // the short format requires the bech32 checksum
    assert!(matches!(
        Address::decode("ckb1qyqt8xaupvm8837nv3gtc9x0ekkj64vud3jquj5z3w", &mainnet()),
        Err(AddressError::InvalidEncoding(_))
    ));
}

#[test]
fn reject_unknown_format_and_prefix() {
    assert_eq!(
        Address::decode(
            "ckb1qwda0cr08m85hc8jlnfp3zer7xulejywt49kt2rr0vthywaa50xw3vumhs9nvu786dj9p0q5elx66t24n3kxg3wq9mh",
            &mainnet()
        ),
        Err(AddressError::UnknownFormat(0x03))
    );
    assert!(matches!(
        Address::decode_with_prefix(FULL, "ckt", &mainnet()),
        Err(AddressError::PrefixMismatch { .. })
    ));
    let mut broken = FULL.to_owned();
    broken.pop();
    broken.push('q');
    assert!(Address::decode(&broken, &mainnet()).is_err());
}

#[test]
fn round_trip_with_custom_prefix() {
    let script = Script::new(Byte32::new([0xaa; 32]), ScriptHashType::Data2, vec![1u8; 100]);
    let address = Address::new("ckt", script.clone());
    let encoded = address.encode().unwrap();
    assert_eq!(
        Address::decode_with_prefix(&encoded, "ckt", &KnownScripts::default()).unwrap(),
        script
    );
}
