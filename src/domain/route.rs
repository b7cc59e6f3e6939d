use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::measurements::MeasurementCategory;

/// Named screens of the host app with the parameters each one receives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum Route {
    BookingFlow {
        service_id: String,
        tailor_id: String,
    },
    MeasurementsInput {
        category: MeasurementCategory,
    },
    BookingReview,
    OrderDetail {
        order_id: String,
    },
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::BookingFlow { .. } => "BookingFlow",
            Route::MeasurementsInput { .. } => "MeasurementsInput",
            Route::BookingReview => "BookingReview",
            Route::OrderDetail { .. } => "OrderDetail",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::BookingFlow {
                service_id,
                tailor_id,
            } => write!(f, "BookingFlow{{service={service_id}, tailor={tailor_id}}}"),
            Route::MeasurementsInput { category } => {
                write!(f, "MeasurementsInput{{category={category}}}")
            }
            Route::BookingReview => f.write_str("BookingReview"),
            Route::OrderDetail { order_id } => write!(f, "OrderDetail{{order={order_id}}}"),
        }
    }
}
