use crate::models::UserProfile;

// Formats each x1000 step
pub fn format_view_count(number: u64) -> String {
    let num_str = number.to_string();
    let mut result = String::new();
    let len = num_str.len();

    for (i, c) in num_str.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

const CHANNEL_ID_LEN: usize = 24;

/// Normalises whatever the user pasted into the add-channel form into
/// something the channels endpoint can look up: a `@handle` extracted from a
/// channel URL, a bare 24-character channel id found anywhere in the input,
/// or the trimmed input itself as a last resort.
pub fn normalize_channel_input(raw: &str) -> String {
    let input = raw.trim();

    if let Some(pos) = input.find("youtube.com/@") {
        let handle: String = input[pos + "youtube.com/@".len()..]
            .chars()
            .take_while(|c| is_id_char(*c) || *c == '.')
            .collect();
        if !handle.is_empty() {
            return format!("@{handle}");
        }
    }

    // First run of id characters long enough to be a channel id.
    let mut run_start = None;
    for (i, c) in input.char_indices() {
        if is_id_char(c) {
            let start = *run_start.get_or_insert(i);
            if i + c.len_utf8() - start >= CHANNEL_ID_LEN {
                return input[start..start + CHANNEL_ID_LEN].to_string();
            }
        } else {
            run_start = None;
        }
    }

    input.to_string()
}

/// Initials shown in the header when the profile has no picture.
pub fn profile_initials(user: &UserProfile) -> String {
    let names: Vec<&str> = user.username.split_whitespace().collect();
    match names.as_slice() {
        [] => user
            .email
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase().to_string())
            .unwrap_or_else(|| "U".to_string()),
        [single] => single.chars().next().unwrap().to_ascii_uppercase().to_string(),
        [first, .., last] => {
            let mut initials = String::new();
            initials.push(first.chars().next().unwrap().to_ascii_uppercase());
            initials.push(last.chars().next().unwrap().to_ascii_uppercase());
            initials
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str, email: &str) -> UserProfile {
        UserProfile {
            id: 1,
            username: username.to_string(),
            email: email.to_string(),
            profile_picture: None,
        }
    }

    #[test]
    fn view_counts_are_grouped() {
        assert_eq!(format_view_count(0), "0");
        assert_eq!(format_view_count(999), "999");
        assert_eq!(format_view_count(1000), "1,000");
        assert_eq!(format_view_count(1234567), "1,234,567");
    }

    #[test]
    fn handle_urls_become_handles() {
        assert_eq!(
            normalize_channel_input("https://www.youtube.com/@BroCodez"),
            "@BroCodez"
        );
        assert_eq!(
            normalize_channel_input("youtube.com/@some.channel-1/videos"),
            "@some.channel-1"
        );
    }

    #[test]
    fn channel_ids_are_extracted() {
        assert_eq!(
            normalize_channel_input("UCrx-FlNM6BWOJvu3re6HH7w"),
            "UCrx-FlNM6BWOJvu3re6HH7w"
        );
        assert_eq!(
            normalize_channel_input("https://www.youtube.com/channel/UCrx-FlNM6BWOJvu3re6HH7w"),
            "UCrx-FlNM6BWOJvu3re6HH7w"
        );
    }

    #[test]
    fn plain_handles_pass_through() {
        assert_eq!(normalize_channel_input("  @BroCodez "), "@BroCodez");
        assert_eq!(normalize_channel_input("somename"), "somename");
    }

    #[test]
    fn initials_prefer_first_and_last_name() {
        assert_eq!(profile_initials(&user("Ada Lovelace", "a@b.c")), "AL");
        assert_eq!(profile_initials(&user("ada", "a@b.c")), "A");
        assert_eq!(profile_initials(&user("", "zoe@b.c")), "Z");
    }
}
