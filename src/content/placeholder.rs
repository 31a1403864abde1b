//! Built-in posts served until a posts directory or remote CMS is configured

use chrono::NaiveDate;

use super::{Author, BlogPost};

struct Seed {
    id: &'static str,
    title: &'static str,
    slug: &'static str,
    excerpt: &'static str,
    content: &'static str,
    featured_image: &'static str,
    date: (i32, u32, u32),
    author: &'static str,
    avatar: &'static str,
    tags: &'static [&'static str],
    reading_time: u32,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "1",
        title: "Revolutionary Plastic Bottle Recycling Technology",
        slug: "revolutionary-plastic-bottle-recycling-technology",
        excerpt: "Discover how our latest recycling machines are transforming plastic waste into valuable resources, reducing environmental impact while creating economic opportunities.",
        content: r#"
<h2>Introduction to Advanced Recycling</h2>
<p>The future of waste management lies in innovative recycling technologies that can transform what was once considered waste into valuable resources. Our plastic bottle recycling machines represent a breakthrough in sustainable technology.</p>
<h3>Key Features</h3>
<ul>
  <li>99.5% efficiency rate in plastic separation</li>
  <li>Automated sorting and cleaning systems</li>
  <li>Real-time quality monitoring</li>
  <li>Energy-efficient operations</li>
</ul>
<h3>Environmental Impact</h3>
<p>Each machine can process up to 1,000 bottles per hour, significantly reducing the amount of plastic waste that ends up in landfills or oceans. This technology is a crucial step toward Singapore's zero waste goals.</p>
<h3>Economic Benefits</h3>
<p>Communities using our recycling systems have reported:</p>
<ul>
  <li>30% reduction in waste management costs</li>
  <li>Creation of new jobs in the recycling sector</li>
  <li>Revenue generation from recycled materials</li>
  <li>Improved community engagement in sustainability</li>
</ul>
<h3>Future Developments</h3>
<p>Planned upgrades include AI-powered sorting, IoT connectivity for remote monitoring, and enhanced material recovery rates.</p>
"#,
        featured_image: "/images/blog/recycling-technology.jpg",
        date: (2025, 8, 10),
        author: "Dr. Sarah Chen",
        avatar: "/images/authors/sarah-chen.jpg",
        tags: &["Technology", "Recycling", "Innovation"],
        reading_time: 5,
    },
    Seed {
        id: "2",
        title: "Singapore's Journey Toward Zero Waste",
        slug: "singapore-journey-toward-zero-waste",
        excerpt: "Exploring Singapore's ambitious zero waste goals and how innovative recycling solutions are helping the nation lead by example in sustainable waste management.",
        content: r#"
<h2>Singapore's Zero Waste Vision</h2>
<p>Singapore has set an ambitious goal to become a zero waste nation, and recycling technology plays a crucial role in achieving this vision. The government's approach combines policy, technology, and community engagement.</p>
<h3>Current Achievements</h3>
<ul>
  <li>60% recycling rate for non-domestic waste</li>
  <li>Implementation of the Packaging Partnership Programme</li>
  <li>Development of integrated waste management facilities</li>
  <li>Investment in research and development</li>
</ul>
<h3>Role of Technology</h3>
<p>Advanced recycling machines increase recycling efficiency, reduce contamination in recycled materials, enable local processing of recyclables and support circular economy principles.</p>
<h3>Community Involvement</h3>
<p>Success depends on community participation. Educational programs and accessible recycling infrastructure encourage citizens to adopt sustainable practices.</p>
"#,
        featured_image: "/images/blog/singapore-zero-waste.jpg",
        date: (2025, 8, 5),
        author: "Michael Tan",
        avatar: "/images/authors/michael-tan.jpg",
        tags: &["Singapore", "Zero Waste", "Sustainability"],
        reading_time: 4,
    },
    Seed {
        id: "3",
        title: "The Economics of Paper Recycling",
        slug: "economics-of-paper-recycling",
        excerpt: "Understanding the economic benefits of paper recycling and how modern technology is making it more profitable and environmentally friendly than ever before.",
        content: r#"
<h2>Paper Recycling: An Economic Perspective</h2>
<p>Paper recycling has evolved from an environmental necessity to a profitable business opportunity. Modern recycling technology has transformed the economics of paper waste management.</p>
<h3>Market Dynamics</h3>
<ul>
  <li>Increasing demand for recycled paper products</li>
  <li>Rising costs of virgin fiber</li>
  <li>Growing environmental awareness</li>
  <li>Government incentives and regulations</li>
</ul>
<h3>Return on Investment</h3>
<p>Businesses investing in our paper recycling technology typically see:</p>
<ul>
  <li>Payback period of 18-24 months</li>
  <li>20-30% reduction in waste disposal costs</li>
  <li>Revenue generation from recycled materials</li>
  <li>Improved corporate sustainability ratings</li>
</ul>
"#,
        featured_image: "/images/blog/paper-recycling-economics.jpg",
        date: (2025, 7, 28),
        author: "Jennifer Wong",
        avatar: "/images/authors/jennifer-wong.jpg",
        tags: &["Economics", "Paper Recycling", "ROI"],
        reading_time: 6,
    },
];

/// The built-in posts, in canonical order
pub fn placeholder_posts() -> Vec<BlogPost> {
    SEEDS
        .iter()
        .filter_map(|seed| {
            let (y, m, d) = seed.date;
            Some(BlogPost {
                id: seed.id.to_string(),
                title: seed.title.to_string(),
                slug: seed.slug.to_string(),
                excerpt: seed.excerpt.to_string(),
                content: seed.content.trim().to_string(),
                featured_image: Some(seed.featured_image.to_string()),
                published_date: NaiveDate::from_ymd_opt(y, m, d)?,
                author: Some(Author {
                    name: seed.author.to_string(),
                    avatar: Some(seed.avatar.to_string()),
                }),
                tags: Some(seed.tags.iter().map(|t| t.to_string()).collect()),
                reading_time: Some(seed.reading_time),
            })
        })
        .collect()
}
