//! The closed set of cafeteria stations and meal courses.

use std::fmt;

/// A service point in the cafeteria.
///
/// Every station pairs a demand queue of customers with a supply queue of
/// idle servers.  Five stations are staffed by employees; the drinks bar is
/// served by self-service machines and the seating hall by seats.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Station {
    SandwichBar,
    MenuBar,
    DrinksBar,
    CheckOut,
    DessertBar,
    DessertCheckOut,
    SeatingHall,
}

impl Station {
    pub const COUNT: usize = 7;

    pub const ALL: [Station; Station::COUNT] = [
        Station::SandwichBar,
        Station::MenuBar,
        Station::DrinksBar,
        Station::CheckOut,
        Station::DessertBar,
        Station::DessertCheckOut,
        Station::SeatingHall,
    ];

    /// Stations served by employees.
    pub const STAFFED: [Station; 5] = [
        Station::SandwichBar,
        Station::MenuBar,
        Station::CheckOut,
        Station::DessertBar,
        Station::DessertCheckOut,
    ];

    /// Position in [`Station::ALL`]; usable as an array index.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn is_staffed(self) -> bool {
        !matches!(self, Station::DrinksBar | Station::SeatingHall)
    }

    pub fn name(self) -> &'static str {
        match self {
            Station::SandwichBar     => "sandwich_bar",
            Station::MenuBar         => "menu_bar",
            Station::DrinksBar       => "drinks_bar",
            Station::CheckOut        => "check_out",
            Station::DessertBar      => "dessert_bar",
            Station::DessertCheckOut => "dessert_check_out",
            Station::SeatingHall     => "seating_hall",
        }
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which course a customer is eating; decides the seat's resting time and
/// which seating-hall queue the customer joins.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Course {
    #[default]
    Main,
    Dessert,
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Course::Main    => f.write_str("main"),
            Course::Dessert => f.write_str("dessert"),
        }
    }
}
