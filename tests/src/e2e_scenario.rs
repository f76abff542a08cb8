//! End-to-End Scenario Tests for gnbsim
//!
//! Walks one gNB and one UE through the procedures the gNB originates,
//! from NG Setup to UE Context Release, with every PDU encoded by the
//! builders and decoded by the mock AMF.
//!
//! These tests validate:
//! - gNB parameters derived from a YAML profile
//! - UE-associated signalling echoing the AMF-allocated AMF UE NGAP ID
//! - PDU session tunnels surviving the transfer encoding

use gnbsim_common::GnbConfig;
use gnbsim_ngap::procedures::*;
use gnbsim_ngap::transfer::PduSessionResourceSetupResponseTransferParams;
use gnbsim_ngap::UserLocation;
use integration_tests::{
    init_test_logging, init_test_logging_for, next_event, MockAmf, MockAmfEvent, MockPduSession,
    TestResult, TestUe, REGISTRATION_REQUEST, TEST_GNB_YAML,
};

/// Registration Complete NAS PDU
const REGISTRATION_COMPLETE: &[u8] = &[0x7e, 0x00, 0x43];

/// E2E Test: registration, session setup and release for one UE
///
/// 1. gNB sends NG Setup Request built from its profile
/// 2. UE's Registration Request goes up in an Initial UE Message
/// 3. Registration Complete goes up in Uplink NAS Transport
/// 4. gNB answers Initial Context Setup
/// 5. gNB answers PDU Session Resource Setup with its downlink tunnel
/// 6. gNB releases the session, then the UE context
#[tokio::test]
async fn test_e2e_ue_lifecycle() -> TestResult {
    let config = GnbConfig::from_yaml(TEST_GNB_YAML)?;
    init_test_logging_for(&config);
    tracing::info!("========================================");
    tracing::info!("E2E Test: UE Lifecycle");
    tracing::info!("========================================");

    let location = UserLocation::from_config(&config);
    let ue = TestUe::for_index(0);
    let amf = MockAmf::new();

    // Phase 1: NG Setup
    tracing::info!("----------------------------------------");
    tracing::info!("[RAN] Phase 1: NG Setup Procedure");
    tracing::info!("----------------------------------------");

    let setup = NgSetupRequestParams::from_config(&config).ok_or("profile has no slice or an unsupported gNB ID length")?;
    tracing::info!("[RAN] gNB -> AMF: NG Setup Request");
    tracing::info!("  - Global gNB ID: {:02x?}", setup.gnb_id);
    tracing::info!("  - Supported TA: TAC={}, PLMN={}", config.tac, config.plmn);
    amf.receive(&encode_ng_setup_request(&setup)?).await?;

    match next_event(&amf).await? {
        MockAmfEvent::NgSetupReceived {
            gnb_id,
            plmn,
            ran_node_name,
        } => {
            tracing::info!("[CORE] AMF accepted gNB {:02x?} in PLMN {}", gnb_id, plmn);
            assert_eq!(Some(gnb_id), config.gnb_id_bytes());
            assert_eq!(plmn, config.plmn);
            assert_eq!(ran_node_name, config.name);
        }
        other => panic!("Expected NgSetupReceived, got {other:?}"),
    }

    // Phase 2: Registration
    tracing::info!("----------------------------------------");
    tracing::info!("[RAN] Phase 2: UE Registration");
    tracing::info!("----------------------------------------");

    amf.receive(&encode_initial_ue_message(&InitialUeMessageParams {
        ran_ue_ngap_id: ue.ran_ue_ngap_id,
        nas_pdu: REGISTRATION_REQUEST.to_vec(),
        user_location: location,
    })?)
    .await?;

    let amf_ue_ngap_id = match next_event(&amf).await? {
        MockAmfEvent::InitialUeMessage {
            ran_ue_ngap_id,
            amf_ue_ngap_id,
            nas_pdu,
        } => {
            assert_eq!(ran_ue_ngap_id, ue.ran_ue_ngap_id);
            assert_eq!(nas_pdu, REGISTRATION_REQUEST);
            amf_ue_ngap_id
        }
        other => panic!("Expected InitialUeMessage, got {other:?}"),
    };
    tracing::info!("[CORE] AMF UE NGAP ID {} allocated", amf_ue_ngap_id);

    amf.receive(&encode_uplink_nas_transport(&UplinkNasTransportParams {
        amf_ue_ngap_id,
        ran_ue_ngap_id: ue.ran_ue_ngap_id,
        nas_pdu: REGISTRATION_COMPLETE.to_vec(),
        user_location: location,
    })?)
    .await?;
    assert_eq!(
        next_event(&amf).await?,
        MockAmfEvent::UplinkNasTransport {
            amf_ue_ngap_id,
            nas_pdu: REGISTRATION_COMPLETE.to_vec(),
        }
    );

    amf.receive(&encode_initial_context_setup_response(
        &InitialContextSetupResponseParams {
            amf_ue_ngap_id,
            ran_ue_ngap_id: ue.ran_ue_ngap_id,
        },
    )?)
    .await?;
    assert_eq!(
        next_event(&amf).await?,
        MockAmfEvent::InitialContextSetupComplete { amf_ue_ngap_id }
    );

    let context = amf.get_ue_context(amf_ue_ngap_id).await.ok_or("UE context not found")?;
    assert!(context.context_setup);
    assert_eq!(context.nas_pdus.len(), 2);

    // Phase 3: PDU Session
    tracing::info!("----------------------------------------");
    tracing::info!("[RAN] Phase 3: PDU Session Setup");
    tracing::info!("----------------------------------------");

    let response = PduSessionResourceSetupResponseParams::with_transfer(
        amf_ue_ngap_id,
        ue.ran_ue_ngap_id,
        ue.pdu_session_id,
        &PduSessionResourceSetupResponseTransferParams {
            dl_teid: ue.dl_teid,
            ran_n3_address: config.gtp_ip,
            qos_flow_identifier: 1,
            nr_dc_indicator: false,
            secondary: None,
        },
    )?;
    amf.receive(&encode_pdu_session_resource_setup_response(&response)?).await?;

    let expected_session = MockPduSession {
        psi: ue.pdu_session_id,
        gnb_teid: ue.dl_teid,
        gnb_address: config.gtp_ip,
        qfi: 1,
    };
    assert_eq!(
        next_event(&amf).await?,
        MockAmfEvent::PduSessionSetup {
            amf_ue_ngap_id,
            session: expected_session,
        }
    );
    tracing::info!("[CORE] Downlink tunnel {:02x?} @ {}", ue.dl_teid, config.gtp_ip);

    // Phase 4: Release
    tracing::info!("----------------------------------------");
    tracing::info!("[RAN] Phase 4: Release");
    tracing::info!("----------------------------------------");

    let mut release = PduSessionResourceReleaseResponseParams::new(
        amf_ue_ngap_id,
        ue.ran_ue_ngap_id,
        vec![ue.pdu_session_id],
    );
    release.release_response_transfer = config.release_response_transfer.clone();
    amf.receive(&encode_pdu_session_resource_release_response(&release)?).await?;
    assert_eq!(
        next_event(&amf).await?,
        MockAmfEvent::PduSessionsReleased {
            amf_ue_ngap_id,
            pdu_session_ids: vec![ue.pdu_session_id],
        }
    );
    let context = amf.get_ue_context(amf_ue_ngap_id).await.ok_or("UE context not found")?;
    assert!(context.pdu_sessions.is_empty());

    amf.receive(&encode_ue_context_release_complete(&UeContextReleaseCompleteParams {
        amf_ue_ngap_id,
        ran_ue_ngap_id: ue.ran_ue_ngap_id,
        user_location: location,
        pdu_session_ids: vec![],
    })?)
    .await?;
    assert_eq!(
        next_event(&amf).await?,
        MockAmfEvent::UeContextReleased {
            amf_ue_ngap_id,
            active_pdu_session_ids: vec![],
        }
    );
    assert_eq!(amf.ue_count().await, 0);

    tracing::info!("E2E Test: UE Lifecycle PASSED");
    Ok(())
}

/// E2E Test: releasing the UE context while a session is still up reports
/// that session to the AMF
#[tokio::test]
async fn test_e2e_release_with_active_session() -> TestResult {
    init_test_logging();

    let config = GnbConfig::from_yaml(TEST_GNB_YAML)?;
    let location = UserLocation::from_config(&config);
    let ue = TestUe::for_index(3);
    let amf = MockAmf::new();

    let setup = NgSetupRequestParams::from_config(&config).ok_or("profile has no slice or an unsupported gNB ID length")?;
    amf.receive(&encode_ng_setup_request(&setup)?).await?;

    let MockAmfEvent::InitialUeMessage { amf_ue_ngap_id, .. } = amf
        .receive(&encode_initial_ue_message(&InitialUeMessageParams {
            ran_ue_ngap_id: ue.ran_ue_ngap_id,
            nas_pdu: REGISTRATION_REQUEST.to_vec(),
            user_location: location,
        })?)
        .await?
    else {
        panic!("Expected InitialUeMessage");
    };

    let response = PduSessionResourceSetupResponseParams::with_transfer(
        amf_ue_ngap_id,
        ue.ran_ue_ngap_id,
        ue.pdu_session_id,
        &PduSessionResourceSetupResponseTransferParams {
            dl_teid: ue.dl_teid,
            ran_n3_address: config.gtp_ip,
            qos_flow_identifier: 1,
            nr_dc_indicator: false,
            secondary: None,
        },
    )?;
    amf.receive(&encode_pdu_session_resource_setup_response(&response)?).await?;

    let event = amf
        .receive(&encode_ue_context_release_complete(&UeContextReleaseCompleteParams {
            amf_ue_ngap_id,
            ran_ue_ngap_id: ue.ran_ue_ngap_id,
            user_location: location,
            pdu_session_ids: vec![ue.pdu_session_id],
        })?)
        .await?;
    assert_eq!(
        event,
        MockAmfEvent::UeContextReleased {
            amf_ue_ngap_id,
            active_pdu_session_ids: vec![ue.pdu_session_id],
        }
    );
    assert!(amf.get_ue_context(amf_ue_ngap_id).await.is_none());
    Ok(())
}
