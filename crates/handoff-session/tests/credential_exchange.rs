//! Integration tests for ticket acquisition and credential exchange,
//! driven through the simulated Steam and EOS platforms.

use handoff_platform::sim::{Journal, SdkCall, SimEos, SimPlatform, SimSteam};
use handoff_platform::{
    ClientCredentials, EosPlatform, EosSdk, ExternalCredentialType,
    LoginCredentialType, NetworkingIdentity, PlatformOptions, ResultCode,
};
use handoff_session::{
    DEFAULT_TICKET_CAPACITY, IdentityProof, LOGIN_SCOPES, LoginOutcome,
    LoginPoll, SessionError, begin_login,
};

// =========================================================================
// Helpers
// =========================================================================

fn created_platform(eos: &mut SimEos) -> SimPlatform {
    eos.create(&PlatformOptions {
        product_id: "prod".into(),
        sandbox_id: "sandbox".into(),
        deployment_id: "deploy".into(),
        client_credentials: ClientCredentials {
            client_id: "id".into(),
            client_secret: "secret".into(),
        },
    })
    .expect("sim create succeeds")
}

fn acquire(steam: &mut SimSteam) -> Result<IdentityProof, SessionError> {
    IdentityProof::acquire(steam, DEFAULT_TICKET_CAPACITY, &NetworkingIdentity::Unset)
}

// =========================================================================
// Acquisition
// =========================================================================

#[test]
fn test_acquire_hands_steam_full_capacity_buffer() {
    let journal = Journal::default();
    let mut steam = SimSteam::new(journal.clone());

    let proof = acquire(&mut steam).expect("default sim ticket");

    assert_eq!(
        journal.calls(),
        vec![SdkCall::SteamTicket {
            capacity: DEFAULT_TICKET_CAPACITY
        }]
    );
    assert_eq!(proof.len(), 240);
    assert_eq!(proof.capacity(), DEFAULT_TICKET_CAPACITY);
    assert!(proof.handle().is_valid());
}

#[test]
fn test_acquire_zero_bytes_returns_empty_ticket() {
    let mut steam = SimSteam::new(Journal::default()).with_ticket(Vec::new());

    let result = acquire(&mut steam);

    assert!(matches!(result, Err(SessionError::EmptyTicket)));
}

#[test]
fn test_acquire_reported_zero_returns_empty_ticket() {
    // Bytes were written, but Steam says none were: trust the count.
    let mut steam = SimSteam::new(Journal::default()).reporting_len(0);

    let result = acquire(&mut steam);

    assert!(matches!(result, Err(SessionError::EmptyTicket)));
}

#[test]
fn test_acquire_overreported_length_returns_overflow() {
    let mut steam = SimSteam::new(Journal::default()).reporting_len(4096);

    let result = acquire(&mut steam);

    assert!(matches!(
        result,
        Err(SessionError::TicketOverflow {
            written: 4096,
            capacity: DEFAULT_TICKET_CAPACITY
        })
    ));
}

#[test]
fn test_acquire_truncates_ticket_to_written_length() {
    let mut steam = SimSteam::new(Journal::default()).with_ticket(vec![0xab; 10]);

    let proof = acquire(&mut steam).unwrap();

    assert_eq!(proof.as_bytes(), &[0xab; 10]);
}

// =========================================================================
// Exchange
// =========================================================================

#[test]
fn test_512_byte_ticket_issues_single_login_with_684_char_token() {
    let journal = Journal::default();
    let mut steam = SimSteam::new(journal.clone()).with_ticket(vec![0x5a; 512]);
    let mut eos = SimEos::new(journal.clone());
    let mut platform = created_platform(&mut eos);

    let token = acquire(&mut steam).unwrap().into_token();
    assert_eq!(token.len(), 512_usize.div_ceil(3) * 4);
    assert_eq!(token.len(), 684);

    let auth = platform.auth_interface().expect("auth available");
    let _pending = begin_login(auth, &token);

    let logins = journal.logins();
    assert_eq!(logins.len(), 1, "exactly one login call");
    let login = &logins[0];
    assert_eq!(login.scope_flags, LOGIN_SCOPES);
    assert_eq!(
        login.credentials.credential_type,
        LoginCredentialType::ExternalAuth
    );
    assert_eq!(
        login.credentials.external_type,
        Some(ExternalCredentialType::SteamSessionTicket)
    );
    assert_eq!(login.credentials.token, token.as_str());
}

#[test]
fn test_pending_login_ready_only_after_tick() {
    let mut steam = SimSteam::new(Journal::default());
    let mut eos = SimEos::new(Journal::default());
    let mut platform = created_platform(&mut eos);
    let token = acquire(&mut steam).unwrap().into_token();

    let mut pending = begin_login(platform.auth_interface().unwrap(), &token);
    assert_eq!(pending.poll(), LoginPoll::Pending);

    platform.tick();

    match pending.poll() {
        LoginPoll::Ready(LoginOutcome::LoggedIn(id)) => assert_eq!(id.0.len(), 32),
        other => panic!("expected a successful login, got {other:?}"),
    }
}

#[test]
fn test_pending_login_failure_code_is_reported() {
    let mut steam = SimSteam::new(Journal::default());
    let mut eos = SimEos::new(Journal::default())
        .with_login_result(ResultCode::InvalidCredentials);
    let mut platform = created_platform(&mut eos);
    let token = acquire(&mut steam).unwrap().into_token();

    let mut pending = begin_login(platform.auth_interface().unwrap(), &token);
    platform.tick();

    assert_eq!(
        pending.poll(),
        LoginPoll::Ready(LoginOutcome::Failed(ResultCode::InvalidCredentials))
    );
}

#[tokio::test]
async fn test_wait_resolves_once_platform_ticks() {
    let mut steam = SimSteam::new(Journal::default());
    let mut eos = SimEos::new(Journal::default()).with_login_delay_ticks(3);
    let mut platform = created_platform(&mut eos);
    let token = acquire(&mut steam).unwrap().into_token();
    let pending = begin_login(platform.auth_interface().unwrap(), &token);

    for _ in 0..3 {
        platform.tick();
    }

    let id = pending.wait().await.expect("login succeeds");
    assert_eq!(id.0.len(), 32);
}
