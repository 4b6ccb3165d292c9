//! Content-addressed payload storage.

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use log::debug;
use sha2::{Digest, Sha256};

use crate::errors::StoreError;
use crate::types::ContentAddress;

/// Accepts opaque bytes and returns the address they are stored under.
#[async_trait(?Send)]
pub trait RecordStore {
    async fn add(&self, payload: &[u8]) -> Result<ContentAddress, StoreError>;
}

/// Multibase `f` (base16), CIDv1, raw codec, sha2-256 multihash of 32 bytes.
const CID_V1_RAW_SHA256_PREFIX: &str = "f01551220";

/// CIDv1 of `payload` in base16.
pub fn content_address_of(payload: &[u8]) -> ContentAddress {
    let digest = Sha256::digest(payload);
    ContentAddress::new(format!("{CID_V1_RAW_SHA256_PREFIX}{}", hex::encode(digest)))
}

/// In-process store keyed by content address. Identical payloads share
/// one entry.
#[derive(Default)]
pub struct MemoryRecordStore {
    blobs: RefCell<HashMap<ContentAddress, Vec<u8>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, address: &ContentAddress) -> Option<Vec<u8>> {
        self.blobs.borrow().get(address).cloned()
    }

    pub fn len(&self) -> usize {
        self.blobs.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.borrow().is_empty()
    }
}

#[async_trait(?Send)]
impl RecordStore for MemoryRecordStore {
    async fn add(&self, payload: &[u8]) -> Result<ContentAddress, StoreError> {
        let address = content_address_of(payload);
        debug!("storing {} bytes at {address}", payload.len());
        self.blobs
            .borrow_mut()
            .entry(address.clone())
            .or_insert_with(|| payload.to_vec());
        Ok(address)
    }
}
