//! Reduction of a guest listing to inventory host names

use proxinv_api::{ExclusionSet, GuestRecord};

/// Names of the running guests that are not excluded, in listing order
///
/// Names are passed through as-is: empty or duplicate names are neither
/// dropped nor merged.
pub fn running_guest_names(guests: Vec<GuestRecord>, exclusions: &ExclusionSet) -> Vec<String> {
    guests
        .into_iter()
        .filter(|guest| guest.status.is_running() && !exclusions.contains(&guest.name))
        .map(|guest| guest.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proxinv_api::GuestStatus;

    fn guest(vmid: u32, name: &str, status: GuestStatus) -> GuestRecord {
        GuestRecord::new(vmid, name, status)
    }

    #[test]
    fn test_only_running_guests() {
        let guests = vec![
            guest(100, "web1", GuestStatus::Running),
            guest(101, "web2", GuestStatus::Stopped),
            guest(102, "web3", GuestStatus::Other),
            guest(103, "web4", GuestStatus::Running),
        ];

        let names = running_guest_names(guests, &ExclusionSet::default());
        assert_eq!(names, vec!["web1", "web4"]);
    }

    #[test]
    fn test_excluded_guests_dropped() {
        let guests = vec![
            guest(100, "web1", GuestStatus::Running),
            guest(101, "db1", GuestStatus::Running),
        ];

        let names = running_guest_names(guests, &ExclusionSet::new(["web1"]));
        assert_eq!(names, vec!["db1"]);
    }

    #[test]
    fn test_excluding_stopped_guest_changes_nothing() {
        let guests = vec![
            guest(100, "web1", GuestStatus::Running),
            guest(101, "web2", GuestStatus::Stopped),
        ];

        let names = running_guest_names(guests, &ExclusionSet::new(["web2"]));
        assert_eq!(names, vec!["web1"]);
    }

    #[test]
    fn test_empty_listing() {
        let names = running_guest_names(Vec::new(), &ExclusionSet::new(["web1"]));
        assert!(names.is_empty());
    }

    #[test]
    fn test_duplicates_and_empty_names_pass_through() {
        let guests = vec![
            guest(100, "web1", GuestStatus::Running),
            guest(101, "", GuestStatus::Running),
            guest(102, "web1", GuestStatus::Running),
        ];

        let names = running_guest_names(guests, &ExclusionSet::default());
        assert_eq!(names, vec!["web1", "", "web1"]);
    }

    #[test]
    fn test_matches_set_definition() {
        let exclusions = ExclusionSet::new(["b", "d"]);
        let statuses = [
            GuestStatus::Running,
            GuestStatus::Stopped,
            GuestStatus::Other,
        ];
        let names = ["a", "b", "c", "d", "a"];

        let guests: Vec<GuestRecord> = names
            .iter()
            .enumerate()
            .flat_map(|(i, name)| {
                statuses.iter().enumerate().map(move |(j, status)| {
                    #[allow(clippy::cast_possible_truncation)]
                    let vmid = (100 + i * 3 + j) as u32;
                    guest(vmid, name, *status)
                })
            })
            .collect();

        let expected: Vec<String> = guests
            .iter()
            .filter(|g| g.status == GuestStatus::Running && !exclusions.contains(&g.name))
            .map(|g| g.name.clone())
            .collect();

        let names = running_guest_names(guests, &exclusions);
        assert_eq!(names, expected);
        assert_eq!(names, vec!["a", "c", "a"]);
    }
}
