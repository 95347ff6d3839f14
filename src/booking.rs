use crate::error::{PortfolioError, Result};
use crate::schema::{ApartmentStatus, Branch, BookingRequest};
use log::info;

impl BookingRequest {
    /// Applies the booking to a portfolio snapshot, returning the new snapshot.
    /// The input is never modified.
    pub fn apply(&self, branches: &[Branch]) -> Result<Vec<Branch>> {
        let mut updated = branches.to_vec();
        apply_booking_in_place(&mut updated, self)?;
        Ok(updated)
    }
}

pub fn apply_booking(branches: &[Branch], booking: &BookingRequest) -> Result<Vec<Branch>> {
    booking.apply(branches)
}

/// Marks one unit as rented. Exactly four fields change: status, contract
/// duration, source, and cash collected (one month's rent up front).
/// Lifetime value is left as it was.
///
/// On a lookup miss nothing is modified.
pub fn apply_booking_in_place(branches: &mut [Branch], booking: &BookingRequest) -> Result<()> {
    let branch = branches
        .iter_mut()
        .find(|b| b.id == booking.branch_id)
        .ok_or_else(|| PortfolioError::BranchNotFound(booking.branch_id.clone()))?;

    let apartment = branch
        .find_apartment_mut(&booking.apartment_id)
        .ok_or_else(|| PortfolioError::ApartmentNotFound {
            branch_id: booking.branch_id.clone(),
            apartment_id: booking.apartment_id.clone(),
        })?;

    apartment.status = ApartmentStatus::Rented;
    apartment.contract_duration_months = booking.contract_duration_months;
    apartment.how_heard = Some(booking.how_heard.clone());
    apartment.cash_collected = apartment.monthly_rent;

    info!(
        "Booked {} in {} for {} months ({})",
        booking.apartment_id, booking.branch_id, booking.contract_duration_months, booking.how_heard
    );
    Ok(())
}
