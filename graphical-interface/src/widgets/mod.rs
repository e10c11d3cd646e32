mod count_filter;
mod flight_list;
pub use count_filter::WidgetCountFilter;
pub use flight_list::WidgetFlightList;
