//! # Session Module
//!
//! The photo collection for one session and the rules around it.
//!
//! ## Invariants
//! - At most `capacity` photos, counting slots reserved by batches
//!   still in flight
//! - Photo ids are unique
//! - Insertion order is kept; removal is by index
//!
//! ## Generations
//! `clear()` starts a new generation. A batch admitted under an older
//! generation can no longer commit photos, so work still in flight when
//! the user clears is discarded rather than leaking into the new session.
//!
//! [`PhotoSession`] is the plain owned state. [`SharedSession`] wraps it
//! in `Arc<RwLock<_>>` for the multi-threaded ingestor.

use crate::core::photo::{Photo, PhotoId};
use crate::error::SessionError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Default photo ceiling
pub const DEFAULT_CAPACITY: usize = 1000;

/// Slots held for a batch that passed the capacity check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    pub generation: u64,
    pub slots: usize,
}

/// Counters shown in the upload panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub photo_count: usize,
    pub total_bytes: u64,
}

impl SessionStats {
    /// Total size in MB with two decimals
    pub fn total_megabytes(&self) -> String {
        format!("{:.2}", self.total_bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Ordered photo collection with a hard ceiling
#[derive(Debug)]
pub struct PhotoSession {
    photos: Vec<Photo>,
    ids: HashSet<PhotoId>,
    capacity: usize,
    reserved: usize,
    generation: u64,
}

impl PhotoSession {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            photos: Vec::new(),
            ids: HashSet::new(),
            capacity,
            reserved: 0,
            generation: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn size(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.photos.iter().map(|p| p.size_bytes).sum()
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            photo_count: self.size(),
            total_bytes: self.total_bytes(),
        }
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn get(&self, index: usize) -> Option<&Photo> {
        self.photos.get(index)
    }

    pub fn position(&self, id: PhotoId) -> Option<usize> {
        self.photos.iter().position(|p| p.id == id)
    }

    /// Slots currently held by in-flight batches
    pub fn reserved(&self) -> usize {
        self.reserved
    }

    fn check_capacity(&self, incoming: usize) -> Result<(), SessionError> {
        let current = self.photos.len() + self.reserved;
        if current + incoming > self.capacity {
            return Err(SessionError::CapacityExceeded {
                current,
                incoming,
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    /// Append a batch of finished photos. All or nothing.
    pub fn append(&mut self, photos: Vec<Photo>) -> Result<(), SessionError> {
        self.check_capacity(photos.len())?;

        let mut incoming = HashSet::with_capacity(photos.len());
        for photo in &photos {
            if self.ids.contains(&photo.id) || !incoming.insert(photo.id) {
                return Err(SessionError::DuplicateId {
                    id: photo.id.to_string(),
                });
            }
        }

        self.ids.extend(incoming);
        self.photos.extend(photos);
        Ok(())
    }

    /// Hold `slots` places for a batch about to be processed
    pub fn reserve(&mut self, slots: usize) -> Result<Reservation, SessionError> {
        self.check_capacity(slots)?;
        self.reserved += slots;
        Ok(Reservation {
            generation: self.generation,
            slots,
        })
    }

    /// Commit one photo against a reservation.
    ///
    /// Returns `Ok(false)` when the reservation belongs to a cleared
    /// generation; the photo is dropped.
    pub fn commit(&mut self, reservation: &Reservation, photo: Photo) -> Result<bool, SessionError> {
        if reservation.generation != self.generation {
            return Ok(false);
        }
        if self.ids.contains(&photo.id) {
            return Err(SessionError::DuplicateId {
                id: photo.id.to_string(),
            });
        }

        self.reserved = self.reserved.saturating_sub(1);
        self.ids.insert(photo.id);
        self.photos.push(photo);
        Ok(true)
    }

    /// Give back slots a batch did not use
    pub fn release(&mut self, reservation: &Reservation, unused: usize) {
        if reservation.generation == self.generation {
            self.reserved = self.reserved.saturating_sub(unused);
        }
    }

    pub fn is_current(&self, reservation: &Reservation) -> bool {
        reservation.generation == self.generation
    }

    /// Remove by index. Later photos shift down by one.
    pub fn remove_at(&mut self, index: usize) -> Result<Photo, SessionError> {
        if index >= self.photos.len() {
            return Err(SessionError::IndexOutOfRange {
                index,
                len: self.photos.len(),
            });
        }
        let photo = self.photos.remove(index);
        self.ids.remove(&photo.id);
        Ok(photo)
    }

    /// Drop every photo and start a new generation
    pub fn clear(&mut self) {
        self.photos.clear();
        self.ids.clear();
        self.reserved = 0;
        self.generation += 1;
    }
}

impl Default for PhotoSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe handle to a [`PhotoSession`]
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<RwLock<PhotoSession>>,
}

impl SharedSession {
    pub fn new(session: PhotoSession) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(PhotoSession::with_capacity(capacity))
    }

    pub fn read(&self) -> Result<RwLockReadGuard<'_, PhotoSession>, SessionError> {
        self.inner.read().map_err(|_| SessionError::Poisoned)
    }

    pub fn write(&self) -> Result<RwLockWriteGuard<'_, PhotoSession>, SessionError> {
        self.inner.write().map_err(|_| SessionError::Poisoned)
    }

    /// Run `f` against the current photos under a read lock
    pub fn with_photos<T>(&self, f: impl FnOnce(&[Photo]) -> T) -> Result<T, SessionError> {
        Ok(f(self.read()?.photos()))
    }

    pub fn append(&self, photos: Vec<Photo>) -> Result<(), SessionError> {
        self.write()?.append(photos)
    }

    pub fn remove_at(&self, index: usize) -> Result<Photo, SessionError> {
        self.write()?.remove_at(index)
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        self.write()?.clear();
        Ok(())
    }

    pub fn size(&self) -> Result<usize, SessionError> {
        Ok(self.read()?.size())
    }

    pub fn total_bytes(&self) -> Result<u64, SessionError> {
        Ok(self.read()?.total_bytes())
    }

    pub fn stats(&self) -> Result<SessionStats, SessionError> {
        Ok(self.read()?.stats())
    }
}
