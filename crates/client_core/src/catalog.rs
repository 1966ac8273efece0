use rust_decimal::Decimal;
use shared::domain::{MenuItem, Restaurant, RestaurantId};

pub trait CatalogProvider: Send + Sync {
    fn list_restaurants(&self) -> Vec<Restaurant>;
    /// Unknown restaurant ids yield an empty menu.
    fn list_menu_items(&self, restaurant_id: RestaurantId) -> Vec<MenuItem>;

    fn find_menu_item(&self, restaurant_id: RestaurantId, item_id: i64) -> Option<MenuItem> {
        self.list_menu_items(restaurant_id)
            .into_iter()
            .find(|item| item.id.0 == item_id)
    }
}

/// Case-insensitive match on restaurant name or cuisine. An empty query
/// matches everything.
pub fn search_restaurants(catalog: &dyn CatalogProvider, query: &str) -> Vec<Restaurant> {
    let needle = query.trim().to_lowercase();
    catalog
        .list_restaurants()
        .into_iter()
        .filter(|restaurant| {
            needle.is_empty()
                || restaurant.name.to_lowercase().contains(&needle)
                || restaurant.cuisine.to_lowercase().contains(&needle)
        })
        .collect()
}

/// The built-in demo catalog. Every listed restaurant serves the same menu.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    restaurants: Vec<Restaurant>,
    menu: Vec<MenuItem>,
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self {
            restaurants: demo_restaurants(),
            menu: demo_menu(),
        }
    }

    pub fn with_entries(restaurants: Vec<Restaurant>, menu: Vec<MenuItem>) -> Self {
        Self { restaurants, menu }
    }
}

impl CatalogProvider for StaticCatalog {
    fn list_restaurants(&self) -> Vec<Restaurant> {
        self.restaurants.clone()
    }

    fn list_menu_items(&self, restaurant_id: RestaurantId) -> Vec<MenuItem> {
        if self
            .restaurants
            .iter()
            .any(|restaurant| restaurant.id == restaurant_id)
        {
            self.menu.clone()
        } else {
            Vec::new()
        }
    }
}

fn demo_restaurants() -> Vec<Restaurant> {
    vec![
        Restaurant::new(1, "Pizza Place", "123 Main St", "Pizza"),
        Restaurant::new(2, "Burger Joint", "456 Elm St", "Burgers"),
        Restaurant::new(3, "Sushi Spot", "789 Oak St", "Sushi"),
        Restaurant::new(4, "Taco Haven", "101 Pine St", "Mexican"),
        Restaurant::new(5, "Steakhouse Elite", "202 Maple St", "Steakhouse"),
    ]
}

#[rustfmt::skip]
fn demo_menu() -> Vec<MenuItem> {
    let cents = |value: i64| Decimal::new(value, 2);
    vec![
        // Classic burgers
        MenuItem::new(1, "Classic Cheeseburger", "Juicy beef patty, melted cheddar cheese, lettuce, tomato, pickles, and special sauce.", cents(799)),
        MenuItem::new(2, "Bacon BBQ Burger", "Beef patty with crispy bacon, BBQ sauce, cheddar cheese, lettuce, and onion rings.", cents(949)),
        MenuItem::new(3, "Mushroom Swiss Burger", "Beef patty topped with sautéed mushrooms, Swiss cheese, and garlic aioli.", cents(899)),
        // Gourmet burgers
        MenuItem::new(4, "Truffle Burger", "Beef patty with truffle aioli, sautéed mushrooms, Swiss cheese, and arugula.", cents(1299)),
        MenuItem::new(5, "Lobster Roll", "Fresh lobster meat mixed with lemon herb mayo, served on a toasted bun with lettuce.", cents(1599)),
        // Pizzas
        MenuItem::new(6, "Margherita Pizza", "Classic pizza with tomato sauce, fresh mozzarella, basil leaves, and a drizzle of olive oil.", cents(999)),
        MenuItem::new(7, "Pepperoni Pizza", "Pepperoni slices, mozzarella cheese, and tomato sauce on a hand-tossed crust.", cents(1049)),
        MenuItem::new(8, "Vegetarian Supreme Pizza", "Loaded with bell peppers, mushrooms, olives, onions, and spinach on a tomato base.", cents(1149)),
        MenuItem::new(9, "Prosciutto and Arugula Pizza", "Thinly sliced prosciutto, fresh arugula, shaved Parmesan, and a balsamic glaze.", cents(1299)),
        // Pastas
        MenuItem::new(10, "Spaghetti Carbonara", "Classic Italian pasta with pancetta, eggs, Parmesan cheese, and black pepper.", cents(1199)),
        MenuItem::new(11, "Fettuccine Alfredo", "Fettuccine pasta in a rich and creamy Alfredo sauce made with butter, cream, and Parmesan.", cents(1249)),
        MenuItem::new(12, "Penne Arrabbiata", "Penne pasta tossed in a spicy tomato sauce with garlic, red chili flakes, and parsley.", cents(1099)),
        MenuItem::new(13, "Lasagna Bolognese", "Layers of pasta with rich Bolognese meat sauce, béchamel sauce, and melted mozzarella.", cents(1349)),
        // Appetizers
        MenuItem::new(14, "Truffle Fries", "Crispy fries tossed with truffle oil, Parmesan cheese, and fresh herbs.", cents(699)),
        MenuItem::new(15, "Chicken Wings", "Spicy buffalo wings served with celery sticks and ranch dipping sauce.", cents(849)),
        MenuItem::new(16, "Caprese Salad", "Fresh mozzarella, tomatoes, and basil drizzled with balsamic reduction and olive oil.", cents(799)),
        // Desserts
        MenuItem::new(17, "Chocolate Lava Cake", "Warm chocolate cake with a gooey molten center, served with vanilla ice cream.", cents(699)),
        MenuItem::new(18, "Tiramisu", "Classic Italian dessert with coffee-soaked ladyfingers, mascarpone cheese, and cocoa powder.", cents(749)),
        MenuItem::new(19, "New York Cheesecake", "Rich and creamy cheesecake with a graham cracker crust and a hint of vanilla.", cents(649)),
        // Beverages
        MenuItem::new(20, "Craft Beer", "Locally brewed craft beer with a rich and diverse flavor profile.", cents(599)),
        MenuItem::new(21, "Fresh Lemonade", "Refreshing lemonade made with freshly squeezed lemons and a touch of mint.", cents(499)),
        MenuItem::new(22, "Cold Brew Coffee", "Smooth and strong cold brew coffee served over ice.", cents(399)),
    ]
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
