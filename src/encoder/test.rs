use super::{encode, encode_exports};
use crate::decoder::decode;
use crate::module::{Export, ExportKind, Module, Section, SectionId};

#[test]
fn empty_module_is_just_the_header() {
    assert_eq!(
        encode(&Module::default()),
        vec![0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00]
    );
}

#[test]
fn section_layout() {
    let module = Module {
        sections: vec![
            Section::new(SectionId::Type, vec![0x01, 0x60, 0x00, 0x00]),
            Section::new(SectionId::Custom, vec![0x01, b'x']),
        ],
    };
    let bytes = encode(&module);
    assert_eq!(
        &bytes[8..],
        &[0x01, 0x04, 0x01, 0x60, 0x00, 0x00, 0x00, 0x02, 0x01, b'x']
    );
}

#[test]
fn long_payload_gets_multi_byte_size() {
    let mut payload = vec![0x0A];
    payload.extend(std::iter::repeat(0x00).take(199));
    let module = Module {
        sections: vec![Section::new(SectionId::Custom, {
            let mut custom = vec![0x01, b'c'];
            custom.extend_from_slice(&payload);
            custom
        })],
    };
    let bytes = encode(&module);
    // 202 bytes of payload -> 0xCA 0x01
    assert_eq!(&bytes[8..11], &[0x00, 0xCA, 0x01]);
    assert_eq!(decode(&bytes).unwrap(), module);
}

#[test]
fn exports_payload() {
    let exports = vec![
        Export {
            name: "run".to_string(),
            kind: ExportKind::Func,
            index: 0,
        },
        Export {
            name: "g".to_string(),
            kind: ExportKind::Global,
            index: 300,
        },
    ];
    assert_eq!(
        encode_exports(&exports),
        vec![0x02, 0x03, b'r', b'u', b'n', 0x00, 0x00, 0x01, b'g', 0x03, 0xAC, 0x02]
    );
    assert_eq!(encode_exports(&[]), vec![0x00]);
}
