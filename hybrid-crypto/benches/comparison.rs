use aes_gcm::Aes256Gcm;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use chacha20poly1305::ChaCha20Poly1305;
use criterion::{Bencher, Criterion, black_box, criterion_group, criterion_main};
use hybrid_crypto::rabbit::{CipherKey, Iv, Rabbit};
use rand::RngCore;

const DATA_SIZE_BYTES: usize = 1024;

fn generate_data(size: usize) -> Vec<u8> {
    let mut data = vec![0u8; size];
    rand::rng().fill_bytes(&mut data);
    data
}

fn setup_rabbit() -> (CipherKey, Iv, Vec<u8>) {
    let mut rng = rand::rng();
    let key = CipherKey::Integer((u128::from(rng.next_u64()) << 64) | u128::from(rng.next_u64()));
    (key, Iv::Integer(rng.next_u64()), generate_data(DATA_SIZE_BYTES))
}

fn bench_rabbit_encrypt(b: &mut Bencher) {
    let (key, iv, data) = setup_rabbit();

    b.iter(|| {
        let mut cipher = Rabbit::new(&key, Some(&iv)).expect("Rabbit key schedule failed");
        black_box(cipher.encrypt(black_box(&data)));
    });
}

fn bench_rabbit_decrypt(b: &mut Bencher) {
    let (key, iv, data) = setup_rabbit();
    let ciphertext = Rabbit::new(&key, Some(&iv))
        .expect("Rabbit key schedule failed during setup")
        .encrypt(&data);

    b.iter(|| {
        let mut cipher = Rabbit::new(&key, Some(&iv)).expect("Rabbit key schedule failed");
        let plaintext = cipher.decrypt(black_box(&ciphertext));
        assert_eq!(plaintext, data);
    });
}

/// A fresh random key for any AEAD, plus the shared payload.
fn setup_aead<C: KeyInit>() -> (C, Vec<u8>) {
    let key = C::generate_key(&mut OsRng);
    (C::new(&key), generate_data(DATA_SIZE_BYTES))
}

// A new nonce per encryption, as a real sender would draw.
fn bench_aead_encrypt<C: Aead + AeadCore + KeyInit>(b: &mut Bencher) {
    let (cipher, data) = setup_aead::<C>();

    b.iter(|| {
        let nonce = C::generate_nonce(&mut OsRng);
        black_box(
            cipher
                .encrypt(black_box(&nonce), black_box(data.as_slice()))
                .expect("AEAD encryption failed"),
        );
    });
}

fn bench_aead_decrypt<C: Aead + AeadCore + KeyInit>(b: &mut Bencher) {
    let (cipher, data) = setup_aead::<C>();
    let nonce = C::generate_nonce(&mut OsRng);
    let ciphertext = cipher
        .encrypt(&nonce, data.as_slice())
        .expect("AEAD encryption failed during setup");

    b.iter(|| {
        let plaintext = cipher
            .decrypt(black_box(&nonce), black_box(ciphertext.as_slice()))
            .expect("AEAD decryption failed");
        assert_eq!(plaintext, data);
    });
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Stream Cipher Comparison");

    group.bench_function("Rabbit Encrypt", bench_rabbit_encrypt);
    group.bench_function("Rabbit Decrypt", bench_rabbit_decrypt);

    group.bench_function("AES-256-GCM Encrypt", bench_aead_encrypt::<Aes256Gcm>);
    group.bench_function("AES-256-GCM Decrypt", bench_aead_decrypt::<Aes256Gcm>);

    group.bench_function(
        "ChaCha20Poly1305 Encrypt",
        bench_aead_encrypt::<ChaCha20Poly1305>,
    );
    group.bench_function(
        "ChaCha20Poly1305 Decrypt",
        bench_aead_decrypt::<ChaCha20Poly1305>,
    );

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
