use med_common::{is_bounded_text, is_identity_string};
use soroban_sdk::String;

use crate::errors::ContractError;

pub const MAX_NAME_LEN: u32 = 64;
pub const MAX_FILE_NAME_LEN: u32 = 255;
/// Long enough for CIDv1 in base16, the longest encoding clients emit.
pub const MAX_CID_LEN: u32 = 128;

pub fn validate_name(name: &String) -> Result<(), ContractError> {
    if !is_bounded_text(name, MAX_NAME_LEN) {
        return Err(ContractError::InvalidName);
    }
    Ok(())
}

pub fn validate_file_name(file_name: &String) -> Result<(), ContractError> {
    if !is_bounded_text(file_name, MAX_FILE_NAME_LEN) {
        return Err(ContractError::InvalidFileName);
    }
    Ok(())
}

pub fn validate_content_address(cid: &String) -> Result<(), ContractError> {
    if !is_bounded_text(cid, MAX_CID_LEN) {
        return Err(ContractError::InvalidContentAddress);
    }
    Ok(())
}

pub fn validate_aadhar(aadhar: &String) -> Result<(), ContractError> {
    if !is_identity_string(aadhar) {
        return Err(ContractError::InvalidAadhar);
    }
    Ok(())
}
