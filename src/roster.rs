use crate::api::{User, UserId};

/// Ordered roster of authorized hosts. Insertion order is display order and
/// no two entries share an id. Constructed around the creating user and
/// never allowed to empty out, so a submission always carries at least one
/// host.
#[derive(Debug, Clone)]
pub struct HostRoster {
    hosts: Vec<User>,
}

impl HostRoster {
    pub fn new(owner: User) -> Self {
        Self { hosts: vec![owner] }
    }

    pub fn hosts(&self) -> &[User] {
        &self.hosts
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.hosts.iter().any(|host| host.id == id)
    }

    /// Append-if-absent: duplicate adds of the same identity are absorbed
    /// and leave the existing entry's position untouched.
    pub fn add(&mut self, user: User) -> bool {
        if self.contains(user.id) {
            return false;
        }
        self.hosts.push(user);
        true
    }

    /// Remove the entry with the given id. Refused when it would leave the
    /// roster empty.
    pub fn remove(&mut self, id: UserId) -> Option<User> {
        if self.hosts.len() == 1 {
            return None;
        }
        let index = self.hosts.iter().position(|host| host.id == id)?;
        Some(self.hosts.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: UserId, uniqname: &str) -> User {
        User::new(id, uniqname, uniqname)
    }

    #[test]
    fn owner_is_the_sole_initial_member() {
        let roster = HostRoster::new(user(1, "abc"));
        assert_eq!(roster.len(), 1);
        assert!(roster.contains(1));
    }

    #[test]
    fn duplicate_adds_are_absorbed() {
        let mut roster = HostRoster::new(user(1, "abc"));
        assert!(roster.add(user(2, "def")));
        assert!(!roster.add(user(2, "def")));
        assert!(!roster.add(user(1, "abc")));
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut roster = HostRoster::new(user(1, "abc"));
        roster.add(user(3, "ghi"));
        roster.add(user(2, "def"));
        let uniqnames: Vec<&str> = roster
            .hosts()
            .iter()
            .map(|h| h.uniqname.as_str())
            .collect();
        assert_eq!(uniqnames, vec!["abc", "ghi", "def"]);
    }

    #[test]
    fn remove_targets_exactly_the_matching_entry() {
        let mut roster = HostRoster::new(user(1, "abc"));
        roster.add(user(2, "def"));
        roster.add(user(3, "ghi"));

        let removed = roster.remove(2).expect("removed");
        assert_eq!(removed.id, 2);
        assert!(!roster.contains(2));
        assert_eq!(roster.len(), 2);
        assert!(roster.remove(2).is_none());
    }

    #[test]
    fn last_host_cannot_be_removed() {
        let mut roster = HostRoster::new(user(1, "abc"));
        assert!(roster.remove(1).is_none());
        assert_eq!(roster.len(), 1);

        roster.add(user(2, "def"));
        // The owner can leave as long as someone else stays.
        assert!(roster.remove(1).is_some());
        assert!(roster.remove(2).is_none());
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn no_duplicates_after_arbitrary_interleavings() {
        let mut roster = HostRoster::new(user(1, "abc"));
        for round in 0..3 {
            for id in 2..6 {
                roster.add(user(id, &format!("u{id}")));
            }
            if round % 2 == 0 {
                roster.remove(3);
            }
        }
        let mut ids: Vec<UserId> = roster.hosts().iter().map(|h| h.id).collect();
        ids.sort_unstable();
        let before = ids.len();
        ids.dedup();
        assert_eq!(before, ids.len());
    }
}
