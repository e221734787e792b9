#[macro_use]
extern crate afl;
use parley::Session;

fn established_session() -> Session {
    let mut local = Session::new().expect("Setup failed");
    let mut remote = Session::new().expect("Setup failed");

    local
        .set_peer_public_key(&remote.public_key_base64())
        .expect("Setup failed");
    remote
        .set_peer_public_key(&local.public_key_base64())
        .expect("Setup failed");

    local
}

fn main() {
    let mut session = established_session();

    fuzz!(|data: &[u8]| {
        if let Ok(input) = std::str::from_utf8(data) {
            let _ = session.decrypt(input);
        }
    });
}
