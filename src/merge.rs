use crate::types::EventRecord;

/// Combine a stub record from the listing page with the rich record parsed
/// from the shift's detail page.
///
/// Title, emoji title, description and requirements come from `rich` when
/// it has them, otherwise from `stub`. Shift id and date/time always come
/// from `stub`.
pub fn merge_records(stub: EventRecord, rich: EventRecord) -> EventRecord {
    EventRecord {
        title: prefer(rich.title, stub.title),
        title_with_emoji: prefer(rich.title_with_emoji, stub.title_with_emoji),
        shift_id: stub.shift_id,
        date_time: stub.date_time,
        description: prefer(rich.description, stub.description),
        requirements: if rich.requirements.is_empty() {
            stub.requirements
        } else {
            rich.requirements
        },
    }
}

fn prefer(rich: String, stub: String) -> String {
    if rich.is_empty() {
        stub
    } else {
        rich
    }
}
