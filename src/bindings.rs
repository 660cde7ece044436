//! ABI bindings for the group and event contracts
//!
//! Builds [`ContractCall`]s with encoded calldata and decodes raw return data
//! into the `Raw*` shapes the mapper consumes. Return data that does not
//! decode is reported as [`FriendPayError::ShapeMismatch`].

use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolCall, SolValue};
use serde::{Deserialize, Serialize};

use crate::client::ContractCall;
use crate::{FriendPayError, Result};

sol! {
    struct EventRecord {
        string name;
        string description;
        address owner;
    }

    function getAllEvents() external view returns (EventRecord[] memory);
    function createEvent(string name, string description, address owner) external;

    function getAllGroups() external view returns (string[] memory, string[] memory, uint256[] memory, address[][] memory);
    function getGroupCount() external view returns (uint256);
    function getGroupDetailsById(uint256 groupId) external view returns (string memory, string memory, uint256, address[] memory);
    function createGroup(string name, string description, uint256 totalAmount, address[] recipients) external;
}

/// One element of `getAllEvents()`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    pub name: String,
    pub description: String,
    pub owner: Address,
}

/// `getAllGroups()` as returned: four parallel arrays
///
/// Nothing here guarantees equal lengths; the mapper checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawGroups {
    pub names: Vec<String>,
    pub descriptions: Vec<String>,
    pub total_amounts: Vec<U256>,
    pub recipients: Vec<Vec<Address>>,
}

/// `getGroupDetailsById(index)` tuple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawGroupDetail {
    pub name: String,
    pub description: String,
    pub total_amount: U256,
    pub recipients: Vec<Address>,
}

fn shape_error(function: &str, err: alloy_sol_types::Error) -> FriendPayError {
    log::error!("   ❌ Could not decode {} result: {}", function, err);
    FriendPayError::ShapeMismatch(format!("{} returned undecodable data: {}", function, err))
}

/// Group payments contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupContract {
    pub address: Address,
}

impl GroupContract {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn get_all_groups(&self) -> ContractCall {
        ContractCall::new(self.address, "getAllGroups", getAllGroupsCall {}.abi_encode())
    }

    pub fn decode_all_groups(data: &[u8]) -> Result<RawGroups> {
        let (names, descriptions, total_amounts, recipients) =
            <(Vec<String>, Vec<String>, Vec<U256>, Vec<Vec<Address>>)>::abi_decode_params(
                data, true,
            )
            .map_err(|e| shape_error("getAllGroups", e))?;

        Ok(RawGroups {
            names,
            descriptions,
            total_amounts,
            recipients,
        })
    }

    pub fn get_group_count(&self) -> ContractCall {
        ContractCall::new(self.address, "getGroupCount", getGroupCountCall {}.abi_encode())
    }

    pub fn decode_group_count(data: &[u8]) -> Result<U256> {
        let (count,) = <(U256,)>::abi_decode_params(data, true)
            .map_err(|e| shape_error("getGroupCount", e))?;
        Ok(count)
    }

    pub fn get_group_details_by_id(&self, group_index: u64) -> ContractCall {
        let calldata = getGroupDetailsByIdCall {
            groupId: U256::from(group_index),
        }
        .abi_encode();
        ContractCall::new(self.address, "getGroupDetailsById", calldata)
    }

    pub fn decode_group_detail(data: &[u8]) -> Result<RawGroupDetail> {
        let (name, description, total_amount, recipients) =
            <(String, String, U256, Vec<Address>)>::abi_decode_params(data, true)
                .map_err(|e| shape_error("getGroupDetailsById", e))?;

        Ok(RawGroupDetail {
            name,
            description,
            total_amount,
            recipients,
        })
    }

    /// `createGroup(name, description, totalAmount, recipients)`
    pub fn create_group(
        &self,
        name: &str,
        description: &str,
        total_amount: U256,
        recipients: Vec<Address>,
    ) -> ContractCall {
        let calldata = createGroupCall {
            name: name.to_string(),
            description: description.to_string(),
            totalAmount: total_amount,
            recipients,
        }
        .abi_encode();
        ContractCall::new(self.address, "createGroup", calldata)
    }

    /// Decode `createGroup` calldata back into its arguments
    ///
    /// Used to log and inspect what is about to be signed.
    pub fn decode_create_group(calldata: &[u8]) -> Result<createGroupCall> {
        createGroupCall::abi_decode(calldata, true).map_err(|e| shape_error("createGroup", e))
    }
}

/// Event registry contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventContract {
    pub address: Address,
}

impl EventContract {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn get_all_events(&self) -> ContractCall {
        ContractCall::new(self.address, "getAllEvents", getAllEventsCall {}.abi_encode())
    }

    pub fn decode_all_events(data: &[u8]) -> Result<Vec<RawEvent>> {
        let (events,) = <(Vec<(String, String, Address)>,)>::abi_decode_params(data, true)
            .map_err(|e| shape_error("getAllEvents", e))?;

        Ok(events
            .into_iter()
            .map(|(name, description, owner)| RawEvent {
                name,
                description,
                owner,
            })
            .collect())
    }

    /// `createEvent(name, description, owner)`
    pub fn create_event(&self, name: &str, description: &str, owner: Address) -> ContractCall {
        let calldata = createEventCall {
            name: name.to_string(),
            description: description.to_string(),
            owner,
        }
        .abi_encode();
        ContractCall::new(self.address, "createEvent", calldata)
    }

    pub fn decode_create_event(calldata: &[u8]) -> Result<createEventCall> {
        createEventCall::abi_decode(calldata, true).map_err(|e| shape_error("createEvent", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_selectors_match_signatures() {
        assert_eq!(getAllGroupsCall::SIGNATURE, "getAllGroups()");
        assert_eq!(
            createGroupCall::SIGNATURE,
            "createGroup(string,string,uint256,address[])"
        );
        assert_eq!(
            createEventCall::SIGNATURE,
            "createEvent(string,string,address)"
        );

        let call = GroupContract::new(Address::ZERO).get_all_groups();
        assert_eq!(&call.calldata[..4], getAllGroupsCall::SELECTOR.as_slice());
    }

    #[test]
    fn test_create_group_calldata() {
        let contract = GroupContract::new(address!("00000000000000000000000000000000000000aa"));
        let recipients = vec![
            address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1"),
            address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb2"),
        ];
        let call = contract.create_group("Trip", "Iceland", U256::from(5u64), recipients.clone());

        assert_eq!(call.function, "createGroup");
        assert_eq!(call.address, contract.address);

        let decoded = GroupContract::decode_create_group(&call.calldata).unwrap();
        assert_eq!(decoded.name, "Trip");
        assert_eq!(decoded.description, "Iceland");
        assert_eq!(decoded.totalAmount, U256::from(5u64));
        assert_eq!(decoded.recipients, recipients);
    }

    #[test]
    fn test_decode_all_groups() {
        let owner = address!("00000000000000000000000000000000000000b1");
        let data = (
            vec!["Rent".to_string()],
            vec!["Monthly".to_string()],
            vec![U256::from(7u64)],
            vec![vec![owner]],
        )
            .abi_encode_params();

        let raw = GroupContract::decode_all_groups(&data).unwrap();
        assert_eq!(raw.names, vec!["Rent".to_string()]);
        assert_eq!(raw.total_amounts, vec![U256::from(7u64)]);
        assert_eq!(raw.recipients, vec![vec![owner]]);
    }

    #[test]
    fn test_decode_garbage_is_shape_mismatch() {
        let result = GroupContract::decode_group_detail(&[0u8; 3]);
        assert!(matches!(result, Err(FriendPayError::ShapeMismatch(_))));
    }

    #[test]
    fn test_decode_all_events() {
        let owner = address!("00000000000000000000000000000000000000c1");
        let data = (vec![("Party".to_string(), "Beach".to_string(), owner)],).abi_encode_params();

        let events = EventContract::decode_all_events(&data).unwrap();
        assert_eq!(
            events,
            vec![RawEvent {
                name: "Party".to_string(),
                description: "Beach".to_string(),
                owner,
            }]
        );
    }
}
