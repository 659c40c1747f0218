//! Wallpapers bought with coupons.
//!
//! Ownership lives in its own overlay key; the balance is the ledger's.

use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::codec::{decode_flag_set, encode_flag_set};
use crate::error::{CrosswordError, Result};
use crate::keys;
use crate::ledger::ProgressLedger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Wallpaper {
    pub id: &'static str,
    /// Image file name
    pub image: &'static str,
    pub price: u64,
}

pub const WALLPAPERS: [Wallpaper; 6] = [
    Wallpaper { id: "1", image: "walp1.png", price: 10 },
    Wallpaper { id: "2", image: "walp2.png", price: 10 },
    Wallpaper { id: "3", image: "walp3.png", price: 10 },
    Wallpaper { id: "4", image: "walp4.png", price: 10 },
    Wallpaper { id: "5", image: "walp5.png", price: 10 },
    Wallpaper { id: "6", image: "walp6.png", price: 10 },
];

pub fn find_wallpaper(id: &str) -> Option<&'static Wallpaper> {
    WALLPAPERS.iter().find(|w| w.id == id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PurchaseOutcome {
    Purchased { price: u64, balance: u64 },
    AlreadyOwned,
    InsufficientCoupons { price: u64, balance: u64 },
}

pub struct WallpaperShop {
    ledger: Arc<ProgressLedger>,
    writer: Mutex<()>,
}

impl WallpaperShop {
    pub fn new(ledger: Arc<ProgressLedger>) -> Self {
        Self {
            ledger,
            writer: Mutex::new(()),
        }
    }

    pub async fn owned(&self) -> Result<BTreeSet<String>> {
        let raw = self.ledger.store().get(keys::WALLPAPERS_OWNED).await?;
        Ok(decode_flag_set(keys::WALLPAPERS_OWNED, raw.as_deref()))
    }

    pub async fn is_owned(&self, id: &str) -> Result<bool> {
        Ok(self.owned().await?.contains(id))
    }

    /// Debit the price and record ownership in one commit.
    ///
    /// Nothing is written unless the balance covers the price, and a failed
    /// commit leaves both the balance and the owned set as they were.
    pub async fn purchase(&self, id: &str) -> Result<PurchaseOutcome> {
        let wallpaper =
            find_wallpaper(id).ok_or_else(|| CrosswordError::UnknownWallpaper(id.to_string()))?;
        let _writer = self.writer.lock().await;

        let mut owned = self.owned().await?;
        if !owned.insert(wallpaper.id.to_string()) {
            return Ok(PurchaseOutcome::AlreadyOwned);
        }
        let ownership = (
            keys::WALLPAPERS_OWNED.to_string(),
            encode_flag_set(&owned)?,
        );

        let Some(balance) = self
            .ledger
            .spend_with(wallpaper.price, vec![ownership])
            .await?
        else {
            return Ok(PurchaseOutcome::InsufficientCoupons {
                price: wallpaper.price,
                balance: self.ledger.coupons().await,
            });
        };

        info!("Wallpaper {} unlocked for {} coupons", wallpaper.id, wallpaper.price);
        Ok(PurchaseOutcome::Purchased {
            price: wallpaper.price,
            balance,
        })
    }
}
