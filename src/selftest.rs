/*!
 * Known-answer self-test
 *
 * Runs the published GCM test vectors (McGrew & Viega, test cases 1-18
 * subset) through the streaming engine in both directions, whole and in
 * small chunks.
 */

use crate::cipher::AesKey;
use crate::error::{CryptoError, CryptoResult};
use crate::gcm::{Direction, GcmContext};

/// A hex-encoded GCM known-answer vector
struct KnownAnswer {
    name: &'static str,
    key: &'static str,
    iv: &'static str,
    aad: &'static str,
    plaintext: &'static str,
    ciphertext: &'static str,
    tag: &'static str,
}

const K3: &str = "feffe9928665731c6d6a8f9467308308";
const K9: &str = "feffe9928665731c6d6a8f9467308308feffe9928665731c";
const K15: &str = "feffe9928665731c6d6a8f9467308308feffe9928665731c6d6a8f9467308308";
const P4: &str = "d9313225f88406e5a55909c5aff5269a86a7a9531534f7da2e4c303d8a318a72\
                  1c3c0c95956809532fcf0e2449a6b525b16aedf5aa0de657ba637b39";
const A4: &str = "feedfacedeadbeeffeedfacedeadbeefabaddad2";
const IV6: &str = "9313225df88406e555909c5aff5269aa6a7a9538534f7da1e4c303d2a318a728\
                   c3c0c95156809539fcf0e2429a6b525416aedbf5a0de6a57a637b39b";

const VECTORS: &[KnownAnswer] = &[
    KnownAnswer {
        name: "AES-128 test case 1",
        key: "00000000000000000000000000000000",
        iv: "000000000000000000000000",
        aad: "",
        plaintext: "",
        ciphertext: "",
        tag: "58e2fccefa7e3061367f1d57a4e7455a",
    },
    KnownAnswer {
        name: "AES-128 test case 2",
        key: "00000000000000000000000000000000",
        iv: "000000000000000000000000",
        aad: "",
        plaintext: "00000000000000000000000000000000",
        ciphertext: "0388dace60b6a392f328c2b971b2fe78",
        tag: "ab6e47d42cec13bdf53a67b21257bddf",
    },
    KnownAnswer {
        name: "AES-128 test case 4",
        key: K3,
        iv: "cafebabefacedbaddecaf888",
        aad: A4,
        plaintext: P4,
        ciphertext: "42831ec2217774244b7221b784d0d49ce3aa212f2c02a4e035c17e2329aca12e\
                     21d514b25466931c7d8f6a5aac84aa051ba30b396a0aac973d58e091",
        tag: "5bc94fbc3221a5db94fae95ae7121a47",
    },
    KnownAnswer {
        name: "AES-128 test case 5 (64-bit IV)",
        key: K3,
        iv: "cafebabefacedbad",
        aad: A4,
        plaintext: P4,
        ciphertext: "61353b4c2806934a777ff51fa22a4755699b2a714fcdc6f83766e5f97b6c7423\
                     73806900e49f24b22b097544d4896b424989b5e1ebac0f07c23f4598",
        tag: "3612d2e79e3b0785561be14aaca2fccb",
    },
    KnownAnswer {
        name: "AES-128 test case 6 (480-bit IV)",
        key: K3,
        iv: IV6,
        aad: A4,
        plaintext: P4,
        ciphertext: "8ce24998625615b603a033aca13fb894be9112a5c3a211a8ba262a3cca7e2ca7\
                     01e4a9a4fba43c90ccdcb281d48c7c6fd62875d2aca417034c34aee5",
        tag: "619cc5aefffe0bfa462af43c1699d050",
    },
    KnownAnswer {
        name: "AES-192 test case 7",
        key: "000000000000000000000000000000000000000000000000",
        iv: "000000000000000000000000",
        aad: "",
        plaintext: "",
        ciphertext: "",
        tag: "cd33b28ac773f74ba00ed1f312572435",
    },
    KnownAnswer {
        name: "AES-192 test case 8",
        key: "000000000000000000000000000000000000000000000000",
        iv: "000000000000000000000000",
        aad: "",
        plaintext: "00000000000000000000000000000000",
        ciphertext: "98e7247c07f0fe411c267e4384b0f600",
        tag: "2ff58d80033927ab8ef4d4587514f0fb",
    },
    KnownAnswer {
        name: "AES-192 test case 12 (480-bit IV)",
        key: K9,
        iv: IV6,
        aad: A4,
        plaintext: P4,
        ciphertext: "d27e88681ce3243c4830165a8fdcf9ff1de9a1d8e6b447ef6ef7b79828666e45\
                     81e79012af34ddd9e2f037589b292db3e67c036745fa22e7e9b7373b",
        tag: "dcf566ff291c25bbb8568fc3d376a6d9",
    },
    KnownAnswer {
        name: "AES-192 empty message (128-bit IV)",
        key: "f8022b8988383d5cfd7d9e0e208146e7868d3d714fe85744",
        iv: "5fccd8cb551cfc9c20998da4cb981d49",
        aad: "",
        plaintext: "",
        ciphertext: "",
        tag: "1b5c6c9a28f5edfa4cf99176b0f14077",
    },
    KnownAnswer {
        name: "AES-256 test case 13",
        key: "0000000000000000000000000000000000000000000000000000000000000000",
        iv: "000000000000000000000000",
        aad: "",
        plaintext: "",
        ciphertext: "",
        tag: "530f8afbc74536b9a963b4f1c4cb738b",
    },
    KnownAnswer {
        name: "AES-256 test case 14",
        key: "0000000000000000000000000000000000000000000000000000000000000000",
        iv: "000000000000000000000000",
        aad: "",
        plaintext: "00000000000000000000000000000000",
        ciphertext: "cea7403d4d606b6e074ec5d3baf39d18",
        tag: "d0d1c8a799996bf0265b98b5d48ab919",
    },
    KnownAnswer {
        name: "AES-256 test case 16",
        key: K15,
        iv: "cafebabefacedbaddecaf888",
        aad: A4,
        plaintext: P4,
        ciphertext: "522dc1f099567d07f47f37a32a84427d643a8cdcbfe5c0c97598a2bd2555d1aa\
                     8cb08e48590dbb3da7b08b1056828838c5f61e6393ba7a0abcc9f662",
        tag: "76fc6ece0f4e1768cddf8853bb2d551b",
    },
];

/// Chunk size used for the streaming pass
const STREAM_CHUNK: usize = 7;

/// Run every known-answer vector.
///
/// # Errors
///
/// Returns `SelfTestFailure` naming the first failing case.
pub fn self_test() -> CryptoResult<()> {
    for vector in VECTORS {
        run_vector(vector)?;
        log::info!("GCM self-test passed: {}", vector.name);
    }
    Ok(())
}

fn decode(case: &str, field: &str, value: &str) -> CryptoResult<Vec<u8>> {
    hex::decode(value)
        .map_err(|e| CryptoError::self_test_failure(case, &format!("bad {} encoding: {}", field, e)))
}

fn run_vector(vector: &KnownAnswer) -> CryptoResult<()> {
    let case = vector.name;
    let key = decode(case, "key", vector.key)?;
    let iv = decode(case, "iv", vector.iv)?;
    let aad = decode(case, "aad", vector.aad)?;
    let plaintext = decode(case, "plaintext", vector.plaintext)?;
    let ciphertext = decode(case, "ciphertext", vector.ciphertext)?;
    let tag = decode(case, "tag", vector.tag)?;

    let mut ctx = GcmContext::<AesKey>::with_key(&key)?;

    for chunk_size in [plaintext.len().max(1), STREAM_CHUNK] {
        ctx.start(Direction::Encrypt, &iv, &aad)?;
        let mut produced = Vec::with_capacity(plaintext.len());
        for chunk in plaintext.chunks(chunk_size) {
            produced.extend(ctx.update(chunk)?);
        }
        let produced_tag = ctx.finish(tag.len())?;
        ctx.reset();

        if produced != ciphertext {
            return Err(CryptoError::self_test_failure(case, "ciphertext mismatch"));
        }
        if produced_tag != tag {
            return Err(CryptoError::self_test_failure(case, "tag mismatch"));
        }

        ctx.start(Direction::Decrypt, &iv, &aad)?;
        let mut recovered = Vec::with_capacity(ciphertext.len());
        for chunk in ciphertext.chunks(chunk_size) {
            recovered.extend(ctx.update(chunk)?);
        }
        let verified = ctx.finish_verify(&tag);
        ctx.reset();

        if verified.is_err() {
            return Err(CryptoError::self_test_failure(case, "tag rejected on decrypt"));
        }
        if recovered != plaintext {
            return Err(CryptoError::self_test_failure(case, "plaintext mismatch"));
        }
    }

    Ok(())
}
