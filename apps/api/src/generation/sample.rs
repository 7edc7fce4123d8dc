use crate::models::resume::{Certification, Education, PersonalInfo, Project, Resume, WorkExperience};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The complete example resume used by "auto-fill".
pub fn sample_resume() -> Resume {
    Resume {
        personal_info: PersonalInfo {
            name: "Alex Johnson".into(),
            title: String::new(),
            email: "alex.johnson@example.com".into(),
            phone: "(555) 123-4567".into(),
            location: "San Francisco, CA".into(),
            linkedin: "linkedin.com/in/alexjohnson".into(),
            website: "alexjohnson.dev".into(),
        },
        summary: "Innovative Full Stack Developer with 5+ years of experience building scalable \
                  web applications and services. Passionate about creating intuitive user \
                  experiences and optimizing application performance. Skilled in React, Node.js, \
                  and cloud architecture with a strong focus on code quality and best practices."
            .into(),
        skills: strings(&[
            "JavaScript",
            "TypeScript",
            "React",
            "Node.js",
            "Express",
            "MongoDB",
            "PostgreSQL",
            "AWS",
            "Docker",
            "CI/CD",
            "REST APIs",
            "GraphQL",
        ]),
        work_experience: vec![
            WorkExperience {
                title: "Senior Full Stack Developer".into(),
                company: "TechInnovate Solutions".into(),
                location: "San Francisco, CA".into(),
                start_date: "2022-01".into(),
                end_date: String::new(),
                current: true,
                description: strings(&[
                    "• Led development of a microservices architecture that improved scalability by 200%.",
                    "• Architected and implemented a React-based frontend that reduced load times by 40%.",
                    "• Mentored junior developers and established code review processes that reduced bugs by 30%.",
                    "• Collaborated with product and design teams to deliver features that increased user engagement by 25%.",
                ])
                .join("\n"),
            },
            WorkExperience {
                title: "Full Stack Developer".into(),
                company: "WebSphere Inc.".into(),
                location: "Oakland, CA".into(),
                start_date: "2019-03".into(),
                end_date: "2021-12".into(),
                current: false,
                description: strings(&[
                    "• Developed and maintained RESTful APIs that powered mobile and web applications.",
                    "• Implemented authentication and authorization systems that enhanced security.",
                    "• Created responsive web interfaces using React and modern CSS techniques.",
                    "• Optimized database queries that improved application performance by 35%.",
                ])
                .join("\n"),
            },
        ],
        education: vec![Education {
            degree: "BSc in Computer Science".into(),
            institution: "University of California, Berkeley".into(),
            location: "Berkeley, CA".into(),
            start_date: "2015-09".into(),
            end_date: "2019-05".into(),
            description: "Graduated with honors. Specialized in software engineering and \
                          artificial intelligence."
                .into(),
        }],
        projects: vec![
            Project {
                name: "E-commerce Platform".into(),
                description: "Built a full-stack e-commerce platform using React, Node.js, and \
                              MongoDB. Implemented features including user authentication, product \
                              catalog, shopping cart, and payment processing."
                    .into(),
                link: "github.com/alexj/ecommerce-platform".into(),
                technologies: strings(&["React", "Node.js", "MongoDB", "Stripe API"]),
            },
            Project {
                name: "Task Management App".into(),
                description: "Developed a collaborative task management application with real-time \
                              updates using Socket.io, React, and Express. Features include \
                              drag-and-drop interfaces, task assignments, and progress tracking."
                    .into(),
                link: "taskapp.alexjohnson.dev".into(),
                technologies: strings(&["React", "Express", "Socket.io", "PostgreSQL"]),
            },
        ],
        certifications: vec![
            Certification {
                name: "AWS Certified Solutions Architect".into(),
                issuer: "Amazon Web Services".into(),
                date: "2022-05".into(),
                description: "Validated expertise in designing and deploying scalable systems on AWS."
                    .into(),
            },
            Certification {
                name: "Professional Scrum Master I".into(),
                issuer: "Scrum.org".into(),
                date: "2021-02".into(),
                description: "Certified in Scrum methodologies and agile project management.".into(),
            },
        ],
    }
}
