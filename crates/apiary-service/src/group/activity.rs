//! Activity log messages. Names are escaped before being embedded in links.

use apiary_core::types::{GroupId, MemberRole, UserId};

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn user_link(uid: UserId, username: &str) -> String {
    format!(r#"<a href="/user/profile/{uid}">{}</a>"#, escape(username))
}

fn group_link(id: GroupId, name: &str) -> String {
    format!(r#"<a href="/group/{id}">{}</a>"#, escape(name))
}

#[must_use]
pub fn group_created(actor: (UserId, &str), id: GroupId, name: &str) -> String {
    format!(
        "{} created group {}",
        user_link(actor.0, actor.1),
        group_link(id, name)
    )
}

#[must_use]
pub fn members_added<'a>(
    actor: (UserId, &str),
    members: impl IntoIterator<Item = (UserId, &'a str)>,
    role: MemberRole,
) -> String {
    let links: Vec<String> = members
        .into_iter()
        .map(|(uid, name)| user_link(uid, name))
        .collect();
    format!(
        "{} added group members {} as {}",
        user_link(actor.0, actor.1),
        links.join(", "),
        role.label()
    )
}

#[must_use]
pub fn member_role_changed(
    actor: (UserId, &str),
    member: (UserId, &str),
    role: MemberRole,
) -> String {
    format!(
        r#"{} changed the role of group member {} to "{}""#,
        user_link(actor.0, actor.1),
        user_link(member.0, member.1),
        role.label()
    )
}

#[must_use]
pub fn member_removed(actor: (UserId, &str), member: (UserId, &str)) -> String {
    format!(
        "{} removed group member {}",
        user_link(actor.0, actor.1),
        user_link(member.0, member.1)
    )
}

#[must_use]
pub fn group_updated(actor: (UserId, &str), id: GroupId, name: &str) -> String {
    format!(
        "{} updated group {}",
        user_link(actor.0, actor.1),
        group_link(id, name)
    )
}
