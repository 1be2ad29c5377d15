//! Admin command - operator requests against a running node.

use eyre::{Result, WrapErr, eyre};
use fcr_admin_client::AdminClient;
use fcr_admin_codec::{AdminKey, MessageType};
use fcr_admin_messages::{
    Ack, ChangePeerStatusRequest, InitialisationRequest, InspectPeerRequest, InspectPeerResponse,
    ListPeersRequest, ListPeersResponse, decode, encode, expect_type,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cli::{AdminCommand, AdminOp};

/// Run the admin command and print the response as JSON.
pub async fn run(command: AdminCommand) -> Result<()> {
    let AdminCommand { addr, key, op } = command;

    let output = match op {
        AdminOp::GenerateKey => AdminKey::generate().to_hex(),
        AdminOp::Init {
            node_id,
            private_key,
            key_version,
        } => {
            let request = InitialisationRequest {
                node_id,
                private_key,
                key_version,
            };
            let client = connect(&addr, key.as_deref())?;
            let ack: Ack =
                call(&client, MessageType::Initialisation, &request, MessageType::Ack).await?;
            to_json(&ack)?
        }
        AdminOp::ListPeers => {
            let client = connect(&addr, key.as_deref())?;
            let response: ListPeersResponse = call(
                &client,
                MessageType::ListPeersRequest,
                &ListPeersRequest {},
                MessageType::ListPeersResponse,
            )
            .await?;
            to_json(&response)?
        }
        AdminOp::InspectPeer { peer_id, from, to } => {
            let request = InspectPeerRequest { peer_id, from, to };
            let client = connect(&addr, key.as_deref())?;
            let response: InspectPeerResponse = call(
                &client,
                MessageType::InspectPeerRequest,
                &request,
                MessageType::InspectPeerResponse,
            )
            .await?;
            to_json(&response)?
        }
        AdminOp::ChangePeerStatus { peer_id, status } => {
            let request = ChangePeerStatusRequest { peer_id, status };
            let client = connect(&addr, key.as_deref())?;
            let ack: Ack = call(
                &client,
                MessageType::ChangePeerStatusRequest,
                &request,
                MessageType::Ack,
            )
            .await?;
            to_json(&ack)?
        }
    };

    println!("{output}");
    Ok(())
}

fn connect(addr: &str, key: Option<&str>) -> Result<AdminClient> {
    let key = key.ok_or_else(|| eyre!("admin key required (--key or FCR_ADMIN_KEY)"))?;
    let client = AdminClient::new(addr, key)?;
    debug!(url = client.url(), "connecting to admin server");
    Ok(client)
}

async fn call<Req: Serialize, Resp: DeserializeOwned>(
    client: &AdminClient,
    msg_type: MessageType,
    request: &Req,
    expected: MessageType,
) -> Result<Resp> {
    let payload = encode(request)?;
    let (resp_type, data) = client
        .request(msg_type.as_u8(), &payload)
        .await
        .wrap_err_with(|| format!("{msg_type} request failed"))?;
    expect_type(expected, resp_type)?;
    Ok(decode(&data)?)
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).wrap_err("failed to format response")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_requires_key() {
        let err = connect("127.0.0.1:9010", None).unwrap_err();
        assert!(err.to_string().contains("admin key required"));

        assert!(connect("127.0.0.1:9010", Some("nothex")).is_err());
        let key = AdminKey::generate().to_hex();
        assert_eq!(
            connect("127.0.0.1:9010", Some(&key)).unwrap().url(),
            "http://127.0.0.1:9010"
        );
    }
}
