//! Zone transfer probing against stub servers.

mod common;

use std::net::IpAddr;

use common::{a_record, mx_record, other_record, soa_record, txt_record, StubDns};
use subdomain_recon::dns::{DnsResponse, RecordKind, ResponseCode};
use subdomain_recon::zone::try_zone_transfer;

const SERVER: &str = "10.0.0.1";

fn server() -> IpAddr {
    SERVER.parse().unwrap()
}

#[tokio::test]
async fn successful_transfer_is_classified_by_type() {
    let stub = StubDns::new();
    stub.transfer(
        "example.test",
        SERVER,
        DnsResponse::answered(vec![
            soa_record("example.test.", "ns1.example.test."),
            a_record("www.example.test.", "10.0.0.2"),
            a_record("mail.example.test.", "10.0.0.3"),
            mx_record("example.test.", 10, "mail.example.test."),
            txt_record("example.test.", "v=spf1 -all"),
            other_record("example.test.", "AAAA", "fd00::2"),
        ]),
    );

    let report = try_zone_transfer(&stub, "example.test", server())
        .await
        .expect("transfer allowed");

    assert_eq!(report.soa.len(), 1);
    assert_eq!(report.a.len(), 2);
    assert_eq!(report.mx.len(), 1);
    assert_eq!(report.txt.len(), 1);
    assert_eq!(report.others.len(), 1, "unknown types are kept, not dropped");
    assert_eq!(report.others[0].kind, RecordKind::Other);
    assert_eq!(report.len(), 6);
}

#[tokio::test]
async fn refused_transfer_is_a_typed_refusal() {
    let stub = StubDns::new();
    // Unconfigured transfers answer REFUSED

    let refused = try_zone_transfer(&stub, "example.test", server())
        .await
        .expect_err("transfer must be refused");

    assert_eq!(refused.server, server());
    assert_eq!(refused.reason, ResponseCode::Refused.to_string());
}

#[tokio::test]
async fn non_success_codes_are_refusals() {
    let stub = StubDns::new();
    stub.transfer(
        "example.test",
        SERVER,
        DnsResponse::empty(ResponseCode::NotAuth),
    );

    let refused = try_zone_transfer(&stub, "example.test", server())
        .await
        .expect_err("NOTAUTH is a refusal");
    assert_eq!(refused.reason, "NOTAUTH");
}

#[tokio::test]
async fn each_server_is_probed_independently() {
    let stub = StubDns::new();
    stub.transfer(
        "example.test",
        "10.0.0.1",
        DnsResponse::answered(vec![a_record("www.example.test.", "10.0.0.2")]),
    );
    // 10.0.0.3 stays refused

    let first = try_zone_transfer(&stub, "example.test", "10.0.0.1".parse().unwrap()).await;
    let second = try_zone_transfer(&stub, "example.test", "10.0.0.3".parse().unwrap()).await;

    assert!(first.is_ok(), "one success must not affect other servers");
    assert!(second.is_err());
    assert_eq!(stub.transfers_attempted(), 2);
}
