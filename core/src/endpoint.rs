//! Declarative table of the remote endpoints.
//!
//! Each `Endpoint` maps to one static `EndpointDescriptor`: the name used as
//! the first URL path segment, the HTTP method, and how many path arguments
//! follow it.

use crate::http::HttpMethod;

/// How many path segments follow the endpoint name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathArgs {
    None,
    Required(usize),
    Optional(usize),
}

impl PathArgs {
    pub fn is_required(&self) -> bool {
        matches!(self, PathArgs::Required(_))
    }

    /// Whether `count` path segments are acceptable for this rule.
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            PathArgs::None => count == 0,
            PathArgs::Required(n) => count == n,
            PathArgs::Optional(n) => count == 0 || count == n,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub name: &'static str,
    pub method: HttpMethod,
    pub path_args: PathArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Rate,
    Limit,
    MarketInfo,
    RecentTx,
    TxStat,
    TimeRemaining,
    GetCoins,
    OnlineCoins,
    OfflineCoins,
    ValidPairs,
    TxByApiKey,
    TxByAddress,
    ValidateAddress,
    OrderInfo,
    Shift,
    SendAmount,
    Mail,
    CancelPending,
}

impl Endpoint {
    pub const ALL: [Endpoint; 18] = [
        Endpoint::Rate,
        Endpoint::Limit,
        Endpoint::MarketInfo,
        Endpoint::RecentTx,
        Endpoint::TxStat,
        Endpoint::TimeRemaining,
        Endpoint::GetCoins,
        Endpoint::OnlineCoins,
        Endpoint::OfflineCoins,
        Endpoint::ValidPairs,
        Endpoint::TxByApiKey,
        Endpoint::TxByAddress,
        Endpoint::ValidateAddress,
        Endpoint::OrderInfo,
        Endpoint::Shift,
        Endpoint::SendAmount,
        Endpoint::Mail,
        Endpoint::CancelPending,
    ];

    pub const fn descriptor(self) -> EndpointDescriptor {
        use HttpMethod::{Get, Post};

        let (name, method, path_args) = match self {
            Endpoint::Rate => ("rate", Get, PathArgs::Required(1)),
            Endpoint::Limit => ("limit", Get, PathArgs::Required(1)),
            Endpoint::MarketInfo => ("marketinfo", Get, PathArgs::Optional(1)),
            Endpoint::RecentTx => ("recenttx", Get, PathArgs::Required(1)),
            Endpoint::TxStat => ("txstat", Get, PathArgs::Required(1)),
            Endpoint::TimeRemaining => ("timeremaining", Get, PathArgs::Required(1)),
            Endpoint::GetCoins => ("getcoins", Get, PathArgs::None),
            Endpoint::OnlineCoins => ("onlinecoins", Get, PathArgs::None),
            Endpoint::OfflineCoins => ("offlinecoins", Get, PathArgs::None),
            Endpoint::ValidPairs => ("validpairs", Get, PathArgs::None),
            Endpoint::TxByApiKey => ("txbyapikey", Get, PathArgs::Required(1)),
            Endpoint::TxByAddress => ("txbyaddress", Get, PathArgs::Required(2)),
            Endpoint::ValidateAddress => ("validateaddress", Get, PathArgs::Required(2)),
            Endpoint::OrderInfo => ("orderInfo", Get, PathArgs::Required(1)),
            Endpoint::Shift => ("shift", Post, PathArgs::None),
            Endpoint::SendAmount => ("sendamount", Post, PathArgs::None),
            Endpoint::Mail => ("mail", Post, PathArgs::None),
            Endpoint::CancelPending => ("cancelpending", Post, PathArgs::None),
        };

        EndpointDescriptor {
            name,
            method,
            path_args,
        }
    }

    pub const fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub const fn method(self) -> HttpMethod {
        self.descriptor().method
    }
}
