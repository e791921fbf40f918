use super::*;

#[test]
fn test_minimal_network() {
    let network: NetworkConf =
        serde_yaml::from_str("name: platform-vpc\ncidr: 10.0.0.0/16\n").expect("Failed to parse");

    assert_eq!(network.name, "platform-vpc");
    assert_eq!(network.cidr, "10.0.0.0/16");
    assert_eq!(network.default_instance_tenancy, InstanceTenancy::Default);
    assert!(network.subnets.is_empty());
    assert!(network.nat_gateways.is_none());
}

#[test]
fn test_full_network() {
    let yaml = r#"
name: platform-vpc
cidr: 10.0.0.0/16
ipProtocol: ipv4_only
natGateways: 2
availabilityZones: [us-west-2a, us-west-2b]
defaultInstanceTenancy: DEDICATED
createInternetGateway: true
enableDnsHostnames: true
enableDnsSupport: true
subnets:
  - name: public
    subnetType: PUBLIC
    cidrMask: 24
    mapPublicIpOnLaunch: false
  - name: private
    subnetType: PRIVATE_WITH_EGRESS
    cidrMask: 20
securityGroups:
  - name: nodes
    allowAllOutbound: true
tags:
  Name: platform-vpc
"#;
    let network: NetworkConf = serde_yaml::from_str(yaml).expect("Failed to parse");

    assert_eq!(network.nat_gateways, Some(2));
    assert_eq!(network.availability_zones.len(), 2);
    assert_eq!(network.default_instance_tenancy, InstanceTenancy::Dedicated);
    assert_eq!(network.subnets[1].subnet_type, SubnetType::PrivateWithEgress);
    assert_eq!(network.subnets[1].cidr_mask, 20);
    assert_eq!(network.security_groups[0].allow_all_outbound, Some(true));
    assert_eq!(network.tags.get("Name").map(String::as_str), Some("platform-vpc"));
}

#[test]
fn test_unknown_tenancy_is_rejected() {
    let result: Result<NetworkConf, _> =
        serde_yaml::from_str("name: a\ncidr: 10.0.0.0/16\ndefaultInstanceTenancy: HOST\n");
    assert!(result.is_err());
}
