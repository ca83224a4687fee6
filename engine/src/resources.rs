//! Typed payloads for the sub-resource collections Converge reconciles.
//!
//! Each type carries the fields the remote API reports for one item of
//! its collection and names its stable key: a server-assigned id where
//! one exists, a caller-chosen name where it does not.

use crate::item::Keyed;
use serde::{Deserialize, Serialize};

/// A tag assigned to a resource. Keyed by name: the id only exists after
/// the server has accepted the assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagAssignment {
    /// Server-assigned assignment id, absent until the tag is applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Tag name, unique per resource
    pub name: String,
    /// Optional tag value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Whether this tag participates in billing reports
    #[serde(default)]
    pub is_billing_tag: bool,
    /// Who created the assignment (server-reported)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl TagAssignment {
    pub fn new(name: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            id: None,
            name: name.into(),
            value: value.map(str::to_string),
            is_billing_tag: false,
            created_by: None,
        }
    }
}

impl Keyed for TagAssignment {
    type Key = String;

    fn key(&self) -> &String {
        &self.name
    }
}

/// A public IP block bound to a server on a VLAN. Slot-exclusive: a
/// block can only be assigned to one resource at a time, so replacing
/// one requires the unassignment to converge before the next assignment
/// is issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpBlockBinding {
    /// IP block id
    pub id: String,
    /// VLAN the block is bound on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan_id: Option<i32>,
}

impl IpBlockBinding {
    pub fn new(id: impl Into<String>, vlan_id: i32) -> Self {
        Self {
            id: id.into(),
            vlan_id: Some(vlan_id),
        }
    }
}

impl Keyed for IpBlockBinding {
    type Key = String;

    fn key(&self) -> &String {
        &self.id
    }
}

/// A server's membership in a private network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateNetworkAttachment {
    /// Private network id
    pub id: String,
    /// IPs assigned to the server on this network
    #[serde(default)]
    pub ips: Vec<String>,
    /// Whether the server gets its address from the network's DHCP
    #[serde(default)]
    pub dhcp: bool,
    /// Server-reported attachment status text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_description: Option<String>,
}

impl PrivateNetworkAttachment {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ips: Vec::new(),
            dhcp: false,
            status_description: None,
        }
    }

    pub fn with_ips(mut self, ips: Vec<String>) -> Self {
        self.ips = ips;
        self
    }
}

impl Keyed for PrivateNetworkAttachment {
    type Key = String;

    fn key(&self) -> &String {
        &self.id
    }
}

/// A server's membership in a public network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicNetworkAttachment {
    /// Public network id
    pub id: String,
    /// IPs assigned to the server on this network
    #[serde(default)]
    pub ips: Vec<String>,
    /// Server-reported attachment status text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_description: Option<String>,
}

impl PublicNetworkAttachment {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ips: Vec::new(),
            status_description: None,
        }
    }
}

impl Keyed for PublicNetworkAttachment {
    type Key = String;

    fn key(&self) -> &String {
        &self.id
    }
}

/// A node pool in a managed cluster. Keyed by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePool {
    /// Pool name, unique within the cluster
    pub name: String,
    /// Number of nodes in the pool
    pub node_count: i32,
    /// Server type provisioned for each node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_type: Option<String>,
    /// SSH keys installed on pool nodes
    #[serde(default)]
    pub ssh_keys: Vec<String>,
}

impl NodePool {
    pub fn new(name: impl Into<String>, node_count: i32) -> Self {
        Self {
            name: name.into(),
            node_count,
            server_type: None,
            ssh_keys: Vec::new(),
        }
    }
}

impl Keyed for NodePool {
    type Key = String;

    fn key(&self) -> &String {
        &self.name
    }
}
