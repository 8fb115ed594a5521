use base64::{
    Engine as _,
    alphabet,
    engine::{
        DecodePaddingMode,
        GeneralPurpose,
        GeneralPurposeConfig,
        general_purpose::URL_SAFE_NO_PAD,
    },
};

/// Standard alphabet, padding optional. The URL-safe characters are mapped
/// onto it before decoding.
const STANDARD_ANY_PADDING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decodes base64url text (`-` and `_` in place of `+` and `/`), with or
/// without trailing padding. Standard-alphabet input is accepted as well.
pub fn decode_base64url(text: &str) -> Option<Vec<u8>> {
    let translated: String = text
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();
    STANDARD_ANY_PADDING.decode(translated).ok()
}

/// Encodes bytes as unpadded base64url.
pub fn encode_base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}
