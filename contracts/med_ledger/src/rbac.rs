use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::errors::ContractError;
use crate::extend_ttl_address_key;

/// Role held by an account. An account holds at most one role, and once
/// assigned it is never removed.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Unknown = 0,
    Patient = 1,
    Doctor = 2,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Permission {
    RegisterSelf = 1,
    RegisterPatient = 2,
    ReadAnyRecord = 3,
    WriteRecord = 4,
    ReadOwnRecords = 5,
}

pub fn get_base_permissions(env: &Env, role: &Role) -> Vec<Permission> {
    let mut perms = Vec::new(env);

    match role {
        Role::Unknown => perms.push_back(Permission::RegisterSelf),
        Role::Patient => perms.push_back(Permission::ReadOwnRecords),
        Role::Doctor => {
            perms.push_back(Permission::RegisterPatient);
            perms.push_back(Permission::ReadAnyRecord);
            perms.push_back(Permission::WriteRecord);
        }
    }

    perms
}

pub fn role_key(user: &Address) -> (Symbol, Address) {
    (symbol_short!("ROLE_ASN"), user.clone())
}

/// Current role of `user`; accounts never seen by the contract are `Unknown`.
pub fn get_role(env: &Env, user: &Address) -> Role {
    env.storage()
        .persistent()
        .get(&role_key(user))
        .unwrap_or(Role::Unknown)
}

/// Moves `user` out of `Unknown` into `role`.
///
/// Fails with `AlreadyRegistered` when the account already holds a role.
pub fn assign_role(env: &Env, user: &Address, role: Role) -> Result<(), ContractError> {
    if get_role(env, user) != Role::Unknown {
        return Err(ContractError::AlreadyRegistered);
    }

    let key = role_key(user);
    env.storage().persistent().set(&key, &role);
    extend_ttl_address_key(env, &key);
    Ok(())
}

pub fn has_permission(env: &Env, user: &Address, permission: &Permission) -> bool {
    get_base_permissions(env, &get_role(env, user)).contains(permission)
}
