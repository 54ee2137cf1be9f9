// GCM Test Vectors for Interoperability
// Known-answer vectors for AES-GCM with the expected ciphertext and tag

use qasa_gcm::gcm::{self, Direction, GcmContext};
use qasa_gcm::AesKey;
use serde::{Deserialize, Serialize};

/// Test vector structure for GCM operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GcmTestVector {
    pub name: String,
    pub key: Vec<u8>,
    pub iv: Vec<u8>,
    pub aad: Vec<u8>,
    pub plaintext: Vec<u8>,
    pub ciphertext: Vec<u8>,
    pub tag: Vec<u8>,
}

fn vector(
    name: &str,
    key: &str,
    iv: &str,
    aad: &str,
    plaintext: &str,
    ciphertext: &str,
    tag: &str,
) -> GcmTestVector {
    let decode = |field: &str| hex::decode(field).expect("Invalid hex in test vector");
    GcmTestVector {
        name: name.to_string(),
        key: decode(key),
        iv: decode(iv),
        aad: decode(aad),
        plaintext: decode(plaintext),
        ciphertext: decode(ciphertext),
        tag: decode(tag),
    }
}

/// Published GCM test cases 1-18 (McGrew & Viega) for AES-128, AES-192 and AES-256
pub fn nist_test_vectors() -> Vec<GcmTestVector> {
    vec![
        vector(
            "gcm_tc1",
            "00000000000000000000000000000000",
            "000000000000000000000000",
            "",
            "",
            "",
            "58e2fccefa7e3061367f1d57a4e7455a",
        ),
        vector(
            "gcm_tc2",
            "00000000000000000000000000000000",
            "000000000000000000000000",
            "",
            "00000000000000000000000000000000",
            "0388dace60b6a392f328c2b971b2fe78",
            "ab6e47d42cec13bdf53a67b21257bddf",
        ),
        vector(
            "gcm_tc3",
            "feffe9928665731c6d6a8f9467308308",
            "cafebabefacedbaddecaf888",
            "",
            "d9313225f88406e5a55909c5aff5269a86a7a9531534f7da2e4c303d8a318a721c3c0c95956809532fcf0e2449a6b525b16aedf5aa0de657ba637b391aafd255",
            "42831ec2217774244b7221b784d0d49ce3aa212f2c02a4e035c17e2329aca12e21d514b25466931c7d8f6a5aac84aa051ba30b396a0aac973d58e091473f5985",
            "4d5c2af327cd64a62cf35abd2ba6fab4",
        ),
        vector(
            "gcm_tc4",
            "feffe9928665731c6d6a8f9467308308",
            "cafebabefacedbaddecaf888",
            "feedfacedeadbeeffeedfacedeadbeefabaddad2",
            "d9313225f88406e5a55909c5aff5269a86a7a9531534f7da2e4c303d8a318a721c3c0c95956809532fcf0e2449a6b525b16aedf5aa0de657ba637b39",
            "42831ec2217774244b7221b784d0d49ce3aa212f2c02a4e035c17e2329aca12e21d514b25466931c7d8f6a5aac84aa051ba30b396a0aac973d58e091",
            "5bc94fbc3221a5db94fae95ae7121a47",
        ),
        vector(
            "gcm_tc5",
            "feffe9928665731c6d6a8f9467308308",
            "cafebabefacedbad",
            "feedfacedeadbeeffeedfacedeadbeefabaddad2",
            "d9313225f88406e5a55909c5aff5269a86a7a9531534f7da2e4c303d8a318a721c3c0c95956809532fcf0e2449a6b525b16aedf5aa0de657ba637b39",
            "61353b4c2806934a777ff51fa22a4755699b2a714fcdc6f83766e5f97b6c742373806900e49f24b22b097544d4896b424989b5e1ebac0f07c23f4598",
            "3612d2e79e3b0785561be14aaca2fccb",
        ),
        vector(
            "gcm_tc6",
            "feffe9928665731c6d6a8f9467308308",
            "9313225df88406e555909c5aff5269aa6a7a9538534f7da1e4c303d2a318a728c3c0c95156809539fcf0e2429a6b525416aedbf5a0de6a57a637b39b",
            "feedfacedeadbeeffeedfacedeadbeefabaddad2",
            "d9313225f88406e5a55909c5aff5269a86a7a9531534f7da2e4c303d8a318a721c3c0c95956809532fcf0e2449a6b525b16aedf5aa0de657ba637b39",
            "8ce24998625615b603a033aca13fb894be9112a5c3a211a8ba262a3cca7e2ca701e4a9a4fba43c90ccdcb281d48c7c6fd62875d2aca417034c34aee5",
            "619cc5aefffe0bfa462af43c1699d050",
        ),
        vector(
            "gcm_tc7",
            "000000000000000000000000000000000000000000000000",
            "000000000000000000000000",
            "",
            "",
            "",
            "cd33b28ac773f74ba00ed1f312572435",
        ),
        vector(
            "gcm_tc8",
            "000000000000000000000000000000000000000000000000",
            "000000000000000000000000",
            "",
            "00000000000000000000000000000000",
            "98e7247c07f0fe411c267e4384b0f600",
            "2ff58d80033927ab8ef4d4587514f0fb",
        ),
        vector(
            "gcm_tc9",
            "feffe9928665731c6d6a8f9467308308feffe9928665731c",
            "cafebabefacedbaddecaf888",
            "",
            "d9313225f88406e5a55909c5aff5269a86a7a9531534f7da2e4c303d8a318a721c3c0c95956809532fcf0e2449a6b525b16aedf5aa0de657ba637b391aafd255",
            "3980ca0b3c00e841eb06fac4872a2757859e1ceaa6efd984628593b40ca1e19c7d773d00c144c525ac619d18c84a3f4718e2448b2fe324d9ccda2710acade256",
            "9924a7c8587336bfb118024db8674a14",
        ),
        vector(
            "gcm_tc10",
            "feffe9928665731c6d6a8f9467308308feffe9928665731c",
            "cafebabefacedbaddecaf888",
            "feedfacedeadbeeffeedfacedeadbeefabaddad2",
            "d9313225f88406e5a55909c5aff5269a86a7a9531534f7da2e4c303d8a318a721c3c0c95956809532fcf0e2449a6b525b16aedf5aa0de657ba637b39",
            "3980ca0b3c00e841eb06fac4872a2757859e1ceaa6efd984628593b40ca1e19c7d773d00c144c525ac619d18c84a3f4718e2448b2fe324d9ccda2710",
            "2519498e80f1478f37ba55bd6d27618c",
        ),
        vector(
            "gcm_tc11",
            "feffe9928665731c6d6a8f9467308308feffe9928665731c",
            "cafebabefacedbad",
            "feedfacedeadbeeffeedfacedeadbeefabaddad2",
            "d9313225f88406e5a55909c5aff5269a86a7a9531534f7da2e4c303d8a318a721c3c0c95956809532fcf0e2449a6b525b16aedf5aa0de657ba637b39",
            "0f10f599ae14a154ed24b36e25324db8c566632ef2bbb34f8347280fc4507057fddc29df9a471f75c66541d4d4dad1c9e93a19a58e8b473fa0f062f7",
            "65dcc57fcf623a24094fcca40d3533f8",
        ),
        vector(
            "gcm_tc12",
            "feffe9928665731c6d6a8f9467308308feffe9928665731c",
            "9313225df88406e555909c5aff5269aa6a7a9538534f7da1e4c303d2a318a728c3c0c95156809539fcf0e2429a6b525416aedbf5a0de6a57a637b39b",
            "feedfacedeadbeeffeedfacedeadbeefabaddad2",
            "d9313225f88406e5a55909c5aff5269a86a7a9531534f7da2e4c303d8a318a721c3c0c95956809532fcf0e2449a6b525b16aedf5aa0de657ba637b39",
            "d27e88681ce3243c4830165a8fdcf9ff1de9a1d8e6b447ef6ef7b79828666e4581e79012af34ddd9e2f037589b292db3e67c036745fa22e7e9b7373b",
            "dcf566ff291c25bbb8568fc3d376a6d9",
        ),
        vector(
            "gcm_tc13",
            "0000000000000000000000000000000000000000000000000000000000000000",
            "000000000000000000000000",
            "",
            "",
            "",
            "530f8afbc74536b9a963b4f1c4cb738b",
        ),
        vector(
            "gcm_tc14",
            "0000000000000000000000000000000000000000000000000000000000000000",
            "000000000000000000000000",
            "",
            "00000000000000000000000000000000",
            "cea7403d4d606b6e074ec5d3baf39d18",
            "d0d1c8a799996bf0265b98b5d48ab919",
        ),
        vector(
            "gcm_tc15",
            "feffe9928665731c6d6a8f9467308308feffe9928665731c6d6a8f9467308308",
            "cafebabefacedbaddecaf888",
            "",
            "d9313225f88406e5a55909c5aff5269a86a7a9531534f7da2e4c303d8a318a721c3c0c95956809532fcf0e2449a6b525b16aedf5aa0de657ba637b391aafd255",
            "522dc1f099567d07f47f37a32a84427d643a8cdcbfe5c0c97598a2bd2555d1aa8cb08e48590dbb3da7b08b1056828838c5f61e6393ba7a0abcc9f662898015ad",
            "b094dac5d93471bdec1a502270e3cc6c",
        ),
        vector(
            "gcm_tc16",
            "feffe9928665731c6d6a8f9467308308feffe9928665731c6d6a8f9467308308",
            "cafebabefacedbaddecaf888",
            "feedfacedeadbeeffeedfacedeadbeefabaddad2",
            "d9313225f88406e5a55909c5aff5269a86a7a9531534f7da2e4c303d8a318a721c3c0c95956809532fcf0e2449a6b525b16aedf5aa0de657ba637b39",
            "522dc1f099567d07f47f37a32a84427d643a8cdcbfe5c0c97598a2bd2555d1aa8cb08e48590dbb3da7b08b1056828838c5f61e6393ba7a0abcc9f662",
            "76fc6ece0f4e1768cddf8853bb2d551b",
        ),
        vector(
            "gcm_tc17",
            "feffe9928665731c6d6a8f9467308308feffe9928665731c6d6a8f9467308308",
            "cafebabefacedbad",
            "feedfacedeadbeeffeedfacedeadbeefabaddad2",
            "d9313225f88406e5a55909c5aff5269a86a7a9531534f7da2e4c303d8a318a721c3c0c95956809532fcf0e2449a6b525b16aedf5aa0de657ba637b39",
            "c3762df1ca787d32ae47c13bf19844cbaf1ae14d0b976afac52ff7d79bba9de0feb582d33934a4f0954cc2363bc73f7862ac430e64abe499f47c9b1f",
            "3a337dbf46a792c45e454913fe2ea8f2",
        ),
        vector(
            "gcm_tc18",
            "feffe9928665731c6d6a8f9467308308feffe9928665731c6d6a8f9467308308",
            "9313225df88406e555909c5aff5269aa6a7a9538534f7da1e4c303d2a318a728c3c0c95156809539fcf0e2429a6b525416aedbf5a0de6a57a637b39b",
            "feedfacedeadbeeffeedfacedeadbeefabaddad2",
            "d9313225f88406e5a55909c5aff5269a86a7a9531534f7da2e4c303d8a318a721c3c0c95956809532fcf0e2449a6b525b16aedf5aa0de657ba637b39",
            "5a8def2f0c9e53f1f75d7853659e2a20eeb2b22aafde6419a058ab4f6f746bf40fc0c3b780f244452da3ebf1c5d82cdea2418997200ef82e44ae7e3f",
            "a44a8266ee1c8eb0c8b5d4cf5ae9f19a",
        ),
    ]
}

/// Edge cases: unaligned AAD, non-96-bit IVs, truncated tags and odd lengths
pub fn special_case_test_vectors() -> Vec<GcmTestVector> {
    vec![
        vector(
            "empty_plaintext_with_aad",
            "01080f161d242b323940474e555c636a",
            "020910171e252c333a41484f",
            "686561646572206f6e6c79",
            "",
            "",
            "d20aec4b95a44de168cce0e7c7dbdca8",
        ),
        vector(
            "single_byte_plaintext",
            "030a11181f262d343b424950575e656c",
            "040b121920272e353c434a51",
            "",
            "42",
            "7a",
            "b21799b9185137cbd00688c4cfd12470",
        ),
        vector(
            "aad_not_block_aligned",
            "050c131a21282f363d444b525960676e757c838a91989fa6",
            "060d141b222930373e454c53",
            "070e151c232a31383f464d545b62697077",
            "080f161d242b323940474e555c636a71787f868d949ba2a9b0b7bec5ccd3dae1e8",
            "167569e7466d1d429d6cdc0d8483c1fdec5c5abf99a71c6b2e547e8409469a29ab",
            "e9ec1a1ca4462ec41cd1015d771b5529",
        ),
        vector(
            "iv_13_bytes",
            "0910171e252c333a41484f565d646b72",
            "0a11181f262d343b424950575e",
            "",
            "0b121920272e353c434a51585f666d747b828990",
            "1f7354ec26f28ec3a8298be6ca802b867e747855",
            "0a4cede48932108ed27b54f17f663318",
        ),
        vector(
            "iv_16_bytes",
            "0c131a21282f363d444b525960676e757c838a91989fa6adb4bbc2c9d0d7dee5",
            "0d141b222930373e454c535a61686f76",
            "0e151c232a",
            "0f161d242b323940474e555c636a7178",
            "7a599f207ebcf7a162ae4730d76eeded",
            "f6f0b46992af6de2f8ff20a4be8ff967",
        ),
        vector(
            "iv_128_bytes",
            "10171e252c333a41484f565d646b7279",
            "11181f262d343b424950575e656c737a81888f969da4abb2b9c0c7ced5dce3eaf1f8ff060d141b222930373e454c535a61686f767d848b9299a0a7aeb5bcc3cad1d8dfe6edf4fb020910171e252c333a41484f565d646b727980878e959ca3aab1b8bfc6cdd4dbe2e9f0f7fe050c131a21282f363d444b525960676e757c838a",
            "121920272e353c434a51585f666d747b828990979ea5acb3bac1c8cfd6dde4ebf2f900070e151c232a31383f464d545b626970777e858c939aa1a8afb6bdc4cb",
            "131a21282f363d444b525960676e757c838a91989fa6adb4bbc2c9d0d7dee5ecf3fa01080f161d242b323940474e555c636a71787f868d949ba2a9b0b7bec5ccd3dae1e8eff6fd040b121920272e353c434a51585f666d747b828990979ea5acb3bac1c8",
            "5da9b0eeb4def86bfb3dcfb08fac73959736fef9bec4fda3e9e5db18b2780bc2185ca008a76f9319a8510067d06c0cc9b976c7a7c9538adc39458ca8a57ae4369dcef689f26085e96455b50840a86ee03924657c351347d485a7284a21b535516caa09a2",
            "3c1cdeb7dc4741247bdcd534766e5e47",
        ),
        vector(
            "tag_truncated_12",
            "141b222930373e454c535a61686f767d",
            "151c232a31383f464d545b62",
            "161d242b323940474e",
            "171e252c333a41484f565d646b727980878e959ca3aab1b8bfc6cdd4dbe2e9",
            "4156ba25815335871cc4b93ed958e84179fcd3f8a3f63d35b45fb416b38d07",
            "39847675654618fd5423bdfe",
        ),
        vector(
            "tag_truncated_8",
            "181f262d343b424950575e656c737a81888f969da4abb2b9",
            "1920272e353c434a51585f66",
            "",
            "1a21282f363d444b525960676e757c838a91989fa6adb4bbc2c9d0d7dee5ecf3fa01080f161d242b323940474e555c63",
            "f5edef05f24a750d554ec9df323b72191d7958dfafda931d25b1a4e4795d8aadd9bf4781426f06274e6d7714deb5fdcc",
            "2af139b672286d33",
        ),
        vector(
            "tag_truncated_4",
            "1b222930373e454c535a61686f767d848b9299a0a7aeb5bcc3cad1d8dfe6edf4",
            "1c232a31383f464d545b6269",
            "1d242b",
            "1e252c333a4148",
            "1ee3c72b09d359",
            "590eb331",
        ),
        vector(
            "multi_block_odd_length",
            "1f262d343b424950575e656c737a81888f969da4abb2b9c0c7ced5dce3eaf1f8",
            "20272e353c434a51585f666d",
            "21282f363d444b525960676e757c838a91989fa6adb4bbc2c9d0d7dee5ecf3fa01080f161d242b32",
            "222930373e454c535a61686f767d848b9299a0a7aeb5bcc3cad1d8dfe6edf4fb020910171e252c333a41484f565d646b727980878e959ca3aab1b8bfc6cdd4dbe2e9f0f7fe050c131a21282f363d444b525960676e757c838a91989fa6adb4bbc2c9d0d7dee5ecf3fa01080f161d242b323940474e555c636a71787f868d949ba2a9b0b7bec5ccd3dae1e8eff6fd040b121920272e353c434a51585f666d747b828990979ea5acb3bac1c8cfd6dde4ebf2f900070e151c232a31383f464d545b626970777e858c939aa1a8afb6bdc4cbd2d9e0e7eef5fc030a11181f262d343b424950575e656c737a81888f969da4abb2b9c0c7ced5dce3eaf1f8ff060d141b22",
            "0eae551dfd71464116d0a1dbf92bb8e7bbbc4f283589b4e48be3815f80fbf760900cd63739f34cd59c671a2467af5473d8391cf204096f42892545b591bb1e38846a7b4d90b09b59c4bdd1238b01d6cca6818901083ccc207407a0338706aba5f25072acb750590f31185ad54a566c172df7b3b91d6842cbaa10b5b545e8fc2a27aeadfec32db3adc992711160df973390338444bfaf77274b85897bd7ff092603b1495fe2055e45432c5c69b936009e2733f419d23b737d585f3fc1959041b9ab943f5358a4c8febf8961719759d0c1d3856e12575460928a2871f26a553d1222bb3876a3a7f03a84b6e07407afdb887b1b0ad8b42a261f8f0d024573506db8d2",
            "130b3e15898b90d9abe4725f1bf9b9df",
        ),
    ]
}

/// Encrypt the vector's plaintext through the one-shot API and check both outputs
pub fn check_encrypt(vector: &GcmTestVector) {
    let (ciphertext, tag) = gcm::encrypt(
        &vector.plaintext,
        &vector.key,
        &vector.iv,
        Some(&vector.aad[..]),
        vector.tag.len(),
    )
    .unwrap_or_else(|e| panic!("{}: encryption failed: {}", vector.name, e));

    assert_eq!(ciphertext, vector.ciphertext, "{}: ciphertext mismatch", vector.name);
    assert_eq!(tag, vector.tag, "{}: tag mismatch", vector.name);
}

/// Decrypt the vector's ciphertext through the one-shot API
pub fn check_decrypt(vector: &GcmTestVector) {
    let plaintext = gcm::decrypt(
        &vector.ciphertext,
        &vector.key,
        &vector.iv,
        Some(&vector.aad[..]),
        &vector.tag,
    )
    .unwrap_or_else(|e| panic!("{}: decryption failed: {}", vector.name, e));

    assert_eq!(plaintext, vector.plaintext, "{}: plaintext mismatch", vector.name);
}

/// Run the vector through a streaming context, feeding data `chunk` bytes at a time
pub fn check_streaming(vector: &GcmTestVector, chunk: usize) {
    let mut ctx = GcmContext::<AesKey>::with_key(&vector.key).expect("Failed to bind key");

    ctx.start(Direction::Encrypt, &vector.iv, &vector.aad)
        .expect("Failed to start encryption");
    let mut ciphertext = Vec::new();
    for piece in vector.plaintext.chunks(chunk) {
        ciphertext.extend(ctx.update(piece).expect("Failed to encrypt chunk"));
    }
    let tag = ctx.finish(vector.tag.len()).expect("Failed to finish encryption");
    assert_eq!(ciphertext, vector.ciphertext, "{}: chunk {} ciphertext", vector.name, chunk);
    assert_eq!(tag, vector.tag, "{}: chunk {} tag", vector.name, chunk);

    ctx.reset();
    ctx.start(Direction::Decrypt, &vector.iv, &vector.aad)
        .expect("Failed to start decryption");
    let mut plaintext = vector.ciphertext.clone();
    for piece in plaintext.chunks_mut(chunk) {
        ctx.update_in_place(piece).expect("Failed to decrypt chunk");
    }
    ctx.finish_verify(&vector.tag)
        .unwrap_or_else(|e| panic!("{}: chunk {} verify: {}", vector.name, chunk, e));
    assert_eq!(plaintext, vector.plaintext, "{}: chunk {} plaintext", vector.name, chunk);
}
