//! 内置默认商品目录
//!
//! 服务器商品接口不可用时使用。价格为每 50g 的卢比价格。

use shared::models::{Product, ProductCategory};

struct DefaultProduct {
    id: &'static str,
    name: &'static str,
    name_tamil: &'static str,
    price: i64,
    description: &'static str,
    image: &'static str,
    category: ProductCategory,
    badge: Option<&'static str>,
}

const DEFAULT_PRODUCTS: &[DefaultProduct] = &[
    DefaultProduct {
        id: "batham",
        name: "Batham Cashew Nuts",
        name_tamil: "பாதாம் முந்திரி",
        price: 140,
        description: "Premium Batham cashews with creamy texture and buttery flavor from ramapuran.",
        image: "https://m.media-amazon.com/images/I/71o-btxbBiL._AC_UF894,1000_QL80_.jpg",
        category: ProductCategory::Cashews,
        badge: Some("ramapuran Special"),
    },
    DefaultProduct {
        id: "kaju",
        name: "Jumbo Whole Cashews",
        name_tamil: "காஜு முந்திரி",
        price: 130,
        description: "Extra large whole cashews with creamy texture and buttery flavor from ramapuran farms.",
        image: "https://rukminim2.flixcart.com/image/480/480/ks3jjbk0/nut-dry-fruit/4/s/c/1-premium-whole-cashew-nuts-w210-1-kg-1000-gm-big-size-jumbo-original-imag5qq8dfvfvgcj.jpeg?q=90",
        category: ProductCategory::Cashews,
        badge: Some("Premium"),
    },
    DefaultProduct {
        id: "w180",
        name: "W-180 Premium Cashews",
        name_tamil: "W-180 முந்திரி",
        price: 160,
        description: "The largest and most expensive grade, often called the 'King of Cashews'.",
        image: "https://palmtreeshopping.com/cdn/shop/files/CASHEW_W180_THUMBNAIL.png?v=1735376508",
        category: ProductCategory::Cashews,
        badge: Some("Premium"),
    },
    DefaultProduct {
        id: "w210",
        name: "W-210 Cashews",
        name_tamil: "W-210 முந்திரி",
        price: 150,
        description: "'Jumbo' size, slightly smaller than W-180 but still large and premium.",
        image: "https://5.imimg.com/data5/NV/LY/OR/SELLER-26605812/w210-cashew-nut-1000x1000.jpg",
        category: ProductCategory::Cashews,
        badge: Some("Popular"),
    },
    DefaultProduct {
        id: "w240",
        name: "W-240 Cashews",
        name_tamil: "W-240 முந்திரி",
        price: 140,
        description: "A mid-range, standard-sized cashew that offers a balance between size and price.",
        image: "https://5.imimg.com/data5/ANDROID/Default/2024/8/446625112/EK/XD/AB/130288969/product-jpeg-500x500.jpg",
        category: ProductCategory::Cashews,
        badge: None,
    },
    DefaultProduct {
        id: "w320",
        name: "W-320 Cashews",
        name_tamil: "W-320 முந்திரி",
        price: 130,
        description: "The most popular and widely available grade, larger than W-400 but more affordable than higher grades.",
        image: "https://5.imimg.com/data5/SELLER/Default/2020/8/NC/FS/FY/30563227/cashew-w320-500x500.jpg",
        category: ProductCategory::Cashews,
        badge: None,
    },
    DefaultProduct {
        id: "badam",
        name: "Premium California Almonds",
        name_tamil: "பாதாம்",
        price: 120,
        description: "Large, crunchy California almonds with rich flavor and perfect texture.",
        image: "https://cdn.britannica.com/04/194904-050-1B92812A/Raw-Food-Almond-food-Nut-Snack.jpg",
        category: ProductCategory::Nuts,
        badge: Some("Premium"),
    },
    DefaultProduct {
        id: "akhrot",
        name: "Premium Walnut Halves",
        name_tamil: "அக்ரோட்",
        price: 110,
        description: "Fresh walnut halves with rich, earthy flavor and crisp texture.",
        image: "https://images.squarespace-cdn.com/content/v1/56968a5740667a086de661b9/1452716746154-37ZAQOIRP2SGG74534IX/WalnutHalves2.jpg?format=1500w",
        category: ProductCategory::Nuts,
        badge: None,
    },
    DefaultProduct {
        id: "pista",
        name: "Iranian Pistachios",
        name_tamil: "பிஸ்தா",
        price: 160,
        description: "Premium Iranian pistachios, naturally opened and lightly salted.",
        image: "https://iran-pistachio.com/wp-content/uploads/2018/11/iran-pistachio-slider-2-small.jpg",
        category: ProductCategory::Nuts,
        badge: Some("Premium"),
    },
    DefaultProduct {
        id: "makhana",
        name: "Roasted Fox Nuts",
        name_tamil: "மகானா",
        price: 90,
        description: "Lightly roasted fox nuts, perfect for healthy snacking.",
        image: "https://www.mydiversekitchen.com/wp-content/uploads/2015/01/image.1024x1024.jpg",
        category: ProductCategory::Nuts,
        badge: None,
    },
    DefaultProduct {
        id: "kishmish",
        name: "Black Raisins",
        name_tamil: "கிஸ்மிஸ்",
        price: 60,
        description: "Sweet black raisins, perfect for cooking and snacking.",
        image: "https://nuttyyogi.com/cdn/shop/products/blackraisins.png?v=1680767584",
        category: ProductCategory::Dryfruits,
        badge: None,
    },
    DefaultProduct {
        id: "dates",
        name: "Medjool Dates",
        name_tamil: "பேரீச்சம் பழம்",
        price: 80,
        description: "Premium Medjool dates, naturally sweet and rich in fiber.",
        image: "https://cdn.shopify.com/s/files/1/0437/8953/files/Medjool_Dates_15_2048x2048.jpg?v=1745516427",
        category: ProductCategory::Dryfruits,
        badge: Some("Healthy"),
    },
    DefaultProduct {
        id: "blackdates",
        name: "Black Dates",
        name_tamil: "கரு பேரீச்சம் பழம்",
        price: 95,
        description: "Rich black dates with deep flavor and nutritional benefits.",
        image: "https://5.imimg.com/data5/SELLER/Default/2022/4/QL/VY/ON/15059881/black-dates.jpg",
        category: ProductCategory::Dryfruits,
        badge: None,
    },
    DefaultProduct {
        id: "anjeer",
        name: "Dried Figs",
        name_tamil: "அத்தி பழம்",
        price: 110,
        description: "Natural dried figs, rich in fiber and essential nutrients.",
        image: "https://images-cdn.ubuy.ae/647de208711e2c6fa754c6f0-premium-afghani-anjeer-dried-figs.jpg",
        category: ProductCategory::Dryfruits,
        badge: None,
    },
    DefaultProduct {
        id: "apricot",
        name: "Dried Apricots",
        name_tamil: "சர்க்கரை பாதாமி",
        price: 85,
        description: "Sun-dried apricots with natural sweetness and chewy texture.",
        image: "https://rukminim2.flixcart.com/image/480/640/xif0q/nut-dry-fruit/v/o/r/200-premium-quality-dried-apricot-i-dry-fruits-apricots-i-pack-original-imahff8gtyth4fe3.jpeg?q=90",
        category: ProductCategory::Dryfruits,
        badge: None,
    },
    DefaultProduct {
        id: "prune",
        name: "Dried Prunes",
        name_tamil: "உலர்ந்த கொடிமுந்திரி",
        price: 75,
        description: "Natural dried prunes, great for digestive health.",
        image: "https://www.forksoverknives.com/uploads/2024/09/dried-plums-prunes.jpg?auto=webp",
        category: ProductCategory::Dryfruits,
        badge: None,
    },
    DefaultProduct {
        id: "pumpkineseeds",
        name: "Pumpkin Seeds",
        name_tamil: "பூசணி விதைகள்",
        price: 70,
        description: "Roasted pumpkin seeds, rich in zinc and magnesium.",
        image: "https://rukminim2.flixcart.com/image/480/640/xif0q/nut-dry-fruit/v/s/w/1-pumpkeen-250g-flax-seed-250g-sunflower-250g-chai-seed-250g-4-original-imaguuvh3dsu3tqw.jpeg?q=90",
        category: ProductCategory::Seeds,
        badge: Some("Popular"),
    },
    DefaultProduct {
        id: "sunflowerseeds",
        name: "Sunflower Seeds",
        name_tamil: "சூரியகாந்தி விதைகள்",
        price: 55,
        description: "Raw sunflower seeds, packed with vitamin E and healthy fats.",
        image: "https://m.media-amazon.com/images/I/61EuHk70+oL._AC_UF894,1000_QL80_.jpg",
        category: ProductCategory::Seeds,
        badge: None,
    },
    DefaultProduct {
        id: "flaxseeds",
        name: "Flax Seeds",
        name_tamil: "அளசி விதைகள்",
        price: 65,
        description: "Organic flax seeds, excellent source of omega-3 fatty acids.",
        image: "https://rukminim2.flixcart.com/image/480/640/xif0q/plant-seed/b/j/k/150-ga-alsi-flax-seeds-dd-150g-garg-agri-original-imah889zfhhvjksa.jpeg?q=90",
        category: ProductCategory::Seeds,
        badge: None,
    },
    DefaultProduct {
        id: "chia",
        name: "Chia Seeds",
        name_tamil: "சியா விதைகள்",
        price: 90,
        description: "Premium chia seeds, high in fiber and antioxidants.",
        image: "https://media.post.rvohealth.io/wp-content/uploads/sites/3/2021/11/chia_seeds_GettyImages1282395572_Thumb-732x549.jpg",
        category: ProductCategory::Seeds,
        badge: None,
    },
    DefaultProduct {
        id: "blacksesame",
        name: "Black Sesame Seeds",
        name_tamil: "கருப்பு எள்ளு",
        price: 50,
        description: "Natural sesame seeds, rich in calcium and antioxidants.",
        image: "https://m.media-amazon.com/images/I/61l2fI4cEzL._AC_UF1000,1000_QL80_.jpg",
        category: ProductCategory::Seeds,
        badge: None,
    },
    DefaultProduct {
        id: "whitesesame",
        name: "White Sesame Seeds",
        name_tamil: "வெள்ளை எள்ளு",
        price: 50,
        description: "Natural sesame seeds, rich in calcium and antioxidants.",
        image: "https://rukminim2.flixcart.com/image/480/640/kgqvlow0/edible-seed/t/c/x/500-pouch-raw-shree-whole-original-imafww6ytwqgbcxq.jpeg?q=90",
        category: ProductCategory::Seeds,
        badge: None,
    },
    DefaultProduct {
        id: "macadamia",
        name: "Hawaiian Macadamia Nuts",
        name_tamil: "மக்கடாமியா",
        price: 200,
        description: "Rich, buttery Hawaiian macadamia nuts, lightly roasted.",
        image: "https://www.asiafarming.com/wp-content/uploads/2023/12/Macadamia-Nuts-Cultivation4-1024x682.jpg",
        category: ProductCategory::Premium,
        badge: Some("Premium"),
    },
    DefaultProduct {
        id: "brazil",
        name: "Brazil Nuts",
        name_tamil: "பிரேசில் கொட்டை",
        price: 180,
        description: "Large Brazil nuts, excellent source of selenium.",
        image: "https://hodmedods.co.uk/cdn/shop/files/Brazil_Nuts_bowl_board_3x2_903c992b-0ab4-4196-9e20-c3453d3c7096_2000x.jpg?v=1731778883",
        category: ProductCategory::Premium,
        badge: None,
    },
    DefaultProduct {
        id: "pecans",
        name: "Pecan Nuts",
        name_tamil: "பிகான் கொட்டை",
        price: 170,
        description: "Sweet and buttery pecan nuts, perfect for baking.",
        image: "https://media.post.rvohealth.io/wp-content/uploads/2020/08/pecans-732x549-thumbnail.jpg",
        category: ProductCategory::Premium,
        badge: None,
    },
];

/// The built-in catalog, in display order
pub fn default_catalog() -> Vec<Product> {
    DEFAULT_PRODUCTS
        .iter()
        .map(|p| Product {
            id: p.id.to_string(),
            name: p.name.to_string(),
            name_tamil: p.name_tamil.to_string(),
            price: p.price,
            description: p.description.to_string(),
            image: p.image.to_string(),
            category: p.category,
            badge: p.badge.map(str::to_string),
            created_at: None,
            updated_at: None,
        })
        .collect()
}
