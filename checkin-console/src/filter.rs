use checkin_core::Booking;

/// Case-insensitive substring match against first name, last name, ticket
/// number, enrollment number or phone.
pub fn matches_search(booking: &Booking, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();
    let contains = |field: Option<&str>| {
        field.is_some_and(|value| value.to_lowercase().contains(&needle))
    };

    contains(Some(booking.firstname.as_str()))
        || contains(booking.lastname.as_deref())
        || contains(booking.ticket_number.as_deref())
        || contains(booking.enrollment_number.as_deref())
        || contains(booking.phone.as_ref().map(|p| p.expose().as_str()))
}

/// The visible rows for `search`. Pure: depends only on its arguments.
pub fn filter_bookings(bookings: &[Booking], search: &str) -> Vec<Booking> {
    bookings
        .iter()
        .filter(|b| matches_search(b, search))
        .cloned()
        .collect()
}
