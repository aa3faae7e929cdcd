// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Viewer session identity for background results.
//!
//! Clipping runs off the UI thread with no way to cancel it. Each job is
//! tagged with the session it started in, and a result is only accepted
//! while that session is still current.

/// Monotonic session counter.
#[derive(Debug, Default)]
pub struct Session {
    id: u64,
}

/// A background result stamped with the session that requested it.
#[derive(Debug)]
pub struct Tagged<T> {
    pub session: u64,
    pub value: T,
}

impl Session {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Start a new session; results tagged earlier become stale.
    pub fn advance(&mut self) -> u64 {
        self.id = self.id.wrapping_add(1);
        self.id
    }

    /// Stamp a value with the current session.
    pub fn tag<T>(&self, value: T) -> Tagged<T> {
        Tagged {
            session: self.id,
            value,
        }
    }

    /// Unwrap a result if it belongs to the current session.
    pub fn accept<T>(&self, tagged: Tagged<T>) -> Option<T> {
        if tagged.session == self.id {
            Some(tagged.value)
        } else {
            log::debug!(
                "Discarding result from session {} (current {})",
                tagged.session,
                self.id
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_result_is_accepted() {
        let session = Session::default();
        let job = session.tag("clip");
        assert_eq!(session.accept(job), Some("clip"));
    }

    #[test]
    fn test_result_from_previous_session_is_discarded() {
        let mut session = Session::default();
        let job = session.tag("clip");
        session.advance();
        assert_eq!(session.accept(job), None);
    }

    #[test]
    fn test_advance_changes_id() {
        let mut session = Session::default();
        let first = session.id();
        let second = session.advance();
        assert_ne!(first, second);
        assert_eq!(session.id(), second);
    }
}
