#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use qasa_gcm::gcm::{self, Direction, GcmContext};
use qasa_gcm::{AesKey, CryptoError};

#[derive(Arbitrary, Debug)]
struct GcmFuzzInput {
    plaintext: Vec<u8>,
    key: Vec<u8>,
    iv: Vec<u8>,
    associated_data: Vec<u8>,
    ciphertext: Vec<u8>,
    tag: Vec<u8>,
    tag_len: u8,
    chunk_size: u8,
}

fuzz_target!(|input: GcmFuzzInput| {
    let aad = &input.associated_data[..];
    let tag_len = usize::from(input.tag_len);

    // One-shot encryption must agree with streaming encryption
    let one_shot = gcm::encrypt(&input.plaintext, &input.key, &input.iv, Some(aad), tag_len);

    if let Ok(mut ctx) = GcmContext::<AesKey>::with_key(&input.key) {
        let chunk = usize::from(input.chunk_size).max(1);
        let streamed = ctx
            .start(Direction::Encrypt, &input.iv, aad)
            .and_then(|_| {
                let mut ciphertext = Vec::with_capacity(input.plaintext.len());
                for piece in input.plaintext.chunks(chunk) {
                    ciphertext.extend(ctx.update(piece)?);
                }
                Ok((ciphertext, ctx.finish(tag_len)?))
            });

        match (&one_shot, &streamed) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            (Err(_), Err(_)) => {}
            _ => panic!("one-shot and streaming disagree: {:?} vs {:?}", one_shot, streamed),
        }
    }

    // Anything we produce must decrypt back
    if let Ok((ciphertext, tag)) = &one_shot {
        let plaintext = gcm::decrypt(ciphertext, &input.key, &input.iv, Some(aad), tag)
            .expect("own ciphertext rejected");
        assert_eq!(plaintext, input.plaintext);
    }

    // Forged input must never panic and must never yield plaintext with a bad tag
    match gcm::decrypt(&input.ciphertext, &input.key, &input.iv, Some(aad), &input.tag) {
        Ok(_) | Err(CryptoError::AuthenticationFailure { .. }) => {}
        Err(CryptoError::InvalidKeyLength { .. })
        | Err(CryptoError::InvalidTagLength { .. })
        | Err(CryptoError::InvalidParameter { .. }) => {}
        Err(other) => panic!("unexpected error: {}", other),
    }
});
